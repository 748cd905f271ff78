pub mod url_validator;

pub use url_validator::{UrlValidationError, display_host, validate_url};
