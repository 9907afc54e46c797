//! # Rabt Support
//!
//! Shared utilities for the Rabt DI framework.
//!
//! This crate provides:
//! - Text rendering for error messages
//! - Type name helpers shared between rabt crates

pub mod rendering;
