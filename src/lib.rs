pub mod clients;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logging;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
