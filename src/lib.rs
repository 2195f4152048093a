//! Dream Livin Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod ai;
pub mod api;
pub mod config;
pub mod design;
pub mod error;
pub mod prompts;
/// Application state shared by handlers
pub mod state;
pub mod storage;
pub mod tasks;
