pub mod cli;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod hub;
pub mod models;
pub mod processors;
pub mod readers;
pub mod writers;

pub use error::{Result, SyncError};
