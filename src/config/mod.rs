//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User settings persistence (categories, report defaults, backup retention)

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{BackupRetention, Settings};
