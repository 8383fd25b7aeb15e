//! Extracts a single named field from a buffered `multipart/form-data` request body.
//!
//! The whole request body is expected in memory. The parser locates the boundary in
//! the request `Content-Type`, splits the part headers from the content, reads the
//! `Content-Disposition` attributes and the part `Content-Type`, and resolves the exact
//! content range. Every offset is checked against the body, so malformed input yields an
//! [`Error`] instead of an out-of-bounds read.
//!
//! # Examples
//!
//! ```
//! use upload_field::RawRequest;
//!
//! # fn run() -> upload_field::Result<()> {
//! let body = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"me.png\"\r\nContent-Type: image/png\r\n\r\nPNG-DATA\r\n--X-BOUNDARY--";
//! let req = RawRequest::new(body).with_header("Content-Type", "multipart/form-data; boundary=X-BOUNDARY");
//!
//! let field = upload_field::parse(&req)?;
//!
//! assert_eq!(field.name(), "avatar");
//! assert_eq!(field.file_name(), "me.png");
//! assert_eq!(field.content_type(), "image/png");
//! assert_eq!(field.content_length(), field.bytes().len());
//! assert_eq!(field.bytes().as_ref(), b"PNG-DATA");
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
//!
//! ## Optional features
//!
//! - `json`: [`UploadField::json`] decodes the content with `serde_json`.
//! - `tokio-io`: asynchronous persistence through `tokio::fs`.

pub use bytes;

pub use constraints::Constraints;
pub use error::Error;
pub use field::UploadField;
pub use multipart::MultipartParser;
pub use request::{RawRequest, RequestSource};
pub use size_limit::SizeLimit;

mod buffer;
mod constants;
mod constraints;
mod content_disposition;
mod error;
mod field;
mod helpers;
mod multipart;
mod request;
mod size_limit;

/// A Result type often returned from methods that can have `upload_field` errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses the request with default [`Constraints`].
///
/// See [`MultipartParser`] for the parsing stages.
pub fn parse<R: RequestSource + ?Sized>(request: &R) -> crate::Result<UploadField> {
    MultipartParser::new().parse(request)
}

/// Extracts the boundary value from a `Content-Type` header value.
///
/// The boundary is everything after `boundary=`, verbatim: quotes and any
/// following parameters are kept, since they are what the client will send
/// as the delimiter.
pub fn parse_boundary<T: AsRef<str>>(content_type: T) -> crate::Result<String> {
    let content_type = content_type.as_ref();

    let boundary = helpers::find_str_from(content_type, constants::BOUNDARY_PARAM, 0)
        .map(|idx| &content_type[idx + constants::BOUNDARY_PARAM.len()..])
        .filter(|boundary| !boundary.is_empty())
        .ok_or_else(|| crate::Error::MissingBoundaryParameter {
            content_type: content_type.to_owned(),
        })?;

    Ok(boundary.to_owned())
}
