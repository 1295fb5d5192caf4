//! FILENAME: app/src/error.rs

use persistence::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Dataset is not loaded")]
    NotLoaded,

    #[error("Failed to load dataset: {0}")]
    Load(#[from] LoadError),

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
