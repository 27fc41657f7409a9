//! Biblioterm Library Management System
//!
//! A small terminal-driven library manager: catalog, membership, and
//! lending, backed by three flat text files re-saved after every mutation.

pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod repository;
pub mod services;
pub mod terminal;
pub mod text;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
