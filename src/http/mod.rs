//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span)
//!     → extract.rs (validated body / query / pagination)
//!     → [route handler]
//!     → error.rs (failures → status + JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod extract;
pub mod request;
pub mod server;

pub use error::{ApiError, FieldViolation, Location};
pub use request::X_REQUEST_ID;
pub use server::{ApiServer, AppState};
