//! Served-content resolution.
//!
//! This module maps untrusted request paths to canonical file locations
//! under the configured content root, rejecting traversal and injection
//! attempts before any file is opened.

pub mod resolver;

pub use resolver::{Rejection, resolve};
