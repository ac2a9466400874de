//! Shared utilities.
//!
//! - **URL validation**: scheme allow-list plus localhost/private-IP
//!   rejection, applied to catalog entries and to links opened in a browser
//! - **Text processing**: Unicode-aware width handling and terminal
//!   sanitization for feed-sourced strings

mod text;
mod url_validator;

pub use text::{display_width, sanitize_line, truncate_to_width};
pub use url_validator::{validate_url, UrlValidationError};
