//! Presentation Layer
//!
//! HTTP handlers, forms, and router.

pub mod dto;
pub mod handlers;
pub mod payload;
pub mod router;

pub use handlers::BlogAppState;
pub use router::{api_router, api_router_generic, upload_router};
