//! Co-apply library: job posting analysis and achievement matching

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{CoApplyError, Result};
