pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;
