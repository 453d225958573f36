//! Execution Engine
//!
//! CPU dispatch and batch scheduling.

pub mod dispatcher;
pub mod parallel;

pub use dispatcher::{active_backend, available, kernel_for};
