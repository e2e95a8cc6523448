// src/lib.rs

pub mod api;
pub mod commands;
pub mod config;
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::{AnalyzerError, Result};
