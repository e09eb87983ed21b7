pub mod cli;
pub mod command;
pub mod config;
mod error;
pub mod forge;
pub mod orchestrator;
pub mod prompt;
pub mod version;

pub use error::{ReleaseError, Result};
