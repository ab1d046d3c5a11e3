//! # Local Library Common
//!
//! Shared code for the local library catalog:
//! - Record models (Author, Genre, Book, BookCopy) and their derived display fields
//! - Store initialization and schema creation
//! - Configuration resolution
//! - Date and identifier helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
