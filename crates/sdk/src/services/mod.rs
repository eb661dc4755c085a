//! SDK service implementations
//!
//! This module provides service classes for different API domains.

mod systems;

pub use systems::{SystemService, SystemsApi};
