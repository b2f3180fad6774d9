mod customer;
mod identity;
mod product;
mod token;
mod tokens;

pub use customer::Customer;
pub use identity::Identity;
pub use product::Product;
pub use token::{AccessClaims, AuthenticatedUser, BearerToken, RefreshClaims, TokenType};
pub use tokens::{AccessTokenGrant, LoginTokens};

/// Trims the input and collapses any internal runs of whitespace into a
/// single space
pub(crate) fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
