//! Request handler module
//!
//! Routes requests to the static file handler, which owns path resolution
//! and the content-type/encoding headers.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
