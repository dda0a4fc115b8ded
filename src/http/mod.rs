//! HTTP protocol layer module
//!
//! Content-type and content-encoding inference plus response builders,
//! decoupled from request routing.

pub mod encoding;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use encoding::ContentEncoding;
pub use mime::ContentTypes;
pub use response::{
    build_403_response, build_404_response, build_405_response, build_500_response,
    build_file_response, build_html_response, build_redirect_response,
};
