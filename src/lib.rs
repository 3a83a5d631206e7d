//! ClipIQ Library
//!
//! Core modules for the ClipIQ clipboard assistant.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod extractor;
pub mod hotkey;
pub mod llm;
pub mod processor;
pub mod templates;
