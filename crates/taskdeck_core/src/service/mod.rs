//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep presentation layers decoupled from slot and JSON details.

pub mod task_service;
