//! # Songbook Common Library
//!
//! Store and service layer shared by the Songbook web server:
//! - Database schema, models and bootstrap accounts
//! - Credential checks and session records
//! - Song catalog and playlist services
//! - Configuration loading
//!
//! Every service call takes the acting [`Principal`] explicitly.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod playlists;

pub use db::models::{Principal, Role};
pub use error::{Error, Result};
