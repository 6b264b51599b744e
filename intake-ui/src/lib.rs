//! Terminal front end for the quote request intake form.

pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod notices;
pub mod transport;
pub mod views;

pub use app::{Flow, IntakeApp};
pub use config::{AppConfig, ConfigOverrides, LoggingConfig};
