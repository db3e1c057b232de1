//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Affine transform builders
//! - Frame timing
//! - Logging setup

pub mod affine;
pub mod logging;
pub mod math;
pub mod time;
