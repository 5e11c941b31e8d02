//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (add request ID)
//!     → middleware.rs (locale dispatch: pass through, rewrite or redirect)
//!     → upstream.rs (forward to the application server)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod server;
pub mod upstream;

pub use middleware::{locale_middleware, OriginalPath, X_ORIGINAL_PATH};
pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use server::{HttpServer, ServerError};
pub use upstream::Upstream;
