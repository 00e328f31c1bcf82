//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → limits.rs (concurrency bound, body size)
//!     → [handler]
//!     → headers.rs (security response headers)
//! ```

pub mod headers;
pub mod limits;
