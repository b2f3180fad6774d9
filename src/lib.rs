pub mod auth;
pub mod catalog;
pub mod configuration;
pub mod database;
mod error;
pub mod models;
pub mod routes;
pub mod services;
mod startup;
pub mod telemetry;

pub use configuration::get_configuration;
pub use error::{Result, WishlistError};
pub use startup::{build_app, AppState};
