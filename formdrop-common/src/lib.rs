//! # FormDrop Common Library
//!
//! Shared code for the FormDrop services including:
//! - Database layer (init, migrations, models, queries)
//! - Field inference engine (canonical field resolution, key union)
//! - Configuration loading and root folder resolution
//! - Dashboard auth token management
//! - Timestamp utilities

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod time;

pub use error::{Error, Result};
