//! jotter-core - Core library for Jotter
//!
//! This crate contains the note model, the `SQLite` note store and search
//! index, the analytics sink, and the options menu shown from the note editor.

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod options;
pub mod search;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteId};
