//! Foundation module - Core utilities shared by the window system
//!
//! - Logging utilities

pub mod logging;
