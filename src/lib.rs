pub mod boundary;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod message;
pub mod ui;

pub use error::{DeployError, Result};
