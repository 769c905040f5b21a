//! Storage module for file management
//!
//! Provides local scratch directories for spreadsheet uploads and exports.

mod scratch;

pub use scratch::ScratchStorage;
