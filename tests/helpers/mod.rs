#![allow(dead_code)]
mod app;
mod constants;
mod reqwest;

pub use self::reqwest::*;
pub use app::{catalog_products, cheap_hash, spawn_app, spawn_app_with, TestApp};
pub use constants::*;

use lazy_static::lazy_static;

use wishlist::telemetry::{generate_subscriber, init_subscriber};

lazy_static! {
    /// To ensure logs are only outputted in tests when required, by default
    /// tests run with no logs being captured
    ///
    /// In order to set logs to be captured during tests run them with:
    /// `TEST_LOG=true cargo test | bunyan`
    pub static ref TRACING: () = {
        let filter = String::from("debug");
        if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(generate_subscriber("test".into(), filter, std::io::stdout));
        } else {
            init_subscriber(generate_subscriber("test".into(), filter, std::io::sink));
        }
    };
}
