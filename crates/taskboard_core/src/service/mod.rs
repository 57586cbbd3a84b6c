//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, drag and directory calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_service;
pub mod user_directory;
