//! Modules layer - Infrastructure components behind the features
//!
//! Contains the spreadsheet codec and local scratch storage.

pub mod spreadsheet;
pub mod storage;
