//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry mutations into allocation use-cases.
//! - Keep the shell decoupled from entity and journal details.

pub mod allocation_service;
