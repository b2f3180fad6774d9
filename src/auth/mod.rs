mod authenticate;
mod authorize;
mod constants;
mod session;

pub use authenticate::{check_password, hash_password, verify_password};
pub use authorize::TokenKeys;
pub use constants::*;
pub use session::SessionIssuer;
