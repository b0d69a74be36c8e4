pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod store;
pub mod ui;
pub mod warning;

pub use error::{Result, VersionError};
