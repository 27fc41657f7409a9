//! Business logic services

pub mod catalog;
pub mod lending;
pub mod library;
pub mod members;

pub use library::Library;
