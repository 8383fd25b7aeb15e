use std::fmt::{self, Debug, Display, Formatter};
use std::path::PathBuf;

use derive_more::Display;

/// A set of errors that can occur while extracting an upload field and in
/// other operations on it.
#[derive(Display)]
#[non_exhaustive]
pub enum Error {
    /// The request has no `Content-Type` header.
    #[display(fmt = "Content-Type header not found in request")]
    MissingContentTypeHeader,

    /// The `Content-Type` header has no usable `boundary=` parameter.
    #[display(fmt = "multipart boundary not found in Content-Type: \"{}\"", content_type)]
    MissingBoundaryParameter { content_type: String },

    /// The body has no blank line separating the part headers from the content.
    #[display(fmt = "header/content separator not found in request body")]
    MissingHeaderBodySeparator,

    /// The part headers do not declare `Content-Disposition: form-data;`.
    #[display(
        fmt = "part headers do not contain \"Content-Disposition: form-data;\", headers are: \"{}\"",
        headers
    )]
    NotFormData { headers: String },

    /// The part headers have no `name="` attribute.
    #[display(fmt = "part headers do not contain \"name=\", headers are: \"{}\"", headers)]
    MissingNameAttribute { headers: String },

    /// The `name="` attribute is never closed.
    #[display(
        fmt = "closing quote of \"name=\" attribute not found, headers are: \"{}\"",
        headers
    )]
    UnterminatedNameAttribute { headers: String },

    /// The part headers have no `filename="` attribute.
    #[display(fmt = "part headers do not contain \"filename=\", headers are: \"{}\"", headers)]
    MissingFilenameAttribute { headers: String },

    /// The `filename="` attribute is never closed.
    #[display(
        fmt = "closing quote of \"filename=\" attribute not found, headers are: \"{}\"",
        headers
    )]
    UnterminatedFilenameAttribute { headers: String },

    /// The part headers have no `Content-Type: ` line.
    #[display(fmt = "part headers do not contain \"Content-Type: \", headers are: \"{}\"", headers)]
    MissingPartContentType { headers: String },

    /// The computed content range does not fit inside the body.
    #[display(
        fmt = "malformed content range: start {}, end {}, body length {}",
        start,
        "end.map_or_else(|| \"<negative>\".to_owned(), |end| end.to_string())",
        body_len
    )]
    MalformedContentRange {
        start: usize,
        end: Option<usize>,
        body_len: usize,
    },

    /// Writing the field content to disk failed.
    #[display(fmt = "failed to persist field content to {}: {}", "path.display()", cause)]
    PersistenceFailure { path: PathBuf, cause: std::io::Error },

    /// The request body is larger than the configured limit.
    #[display(fmt = "request body exceeded the maximum size limit: {} bytes", limit)]
    BodySizeExceeded { limit: u64 },

    /// The field content is larger than the configured limit.
    #[display(fmt = "field '{}' exceeded the maximum size limit: {} bytes", field_name, limit)]
    FieldSizeExceeded { limit: u64, field_name: String },

    /// The field name is not in the configured
    /// [`allowed_fields`](crate::Constraints::allowed_fields).
    #[display(fmt = "unknown field received: {}", field_name)]
    UnknownField { field_name: String },

    /// Failed to decode the field content as `JSON` in
    /// [`UploadField::json`](crate::UploadField::json).
    #[cfg(feature = "json")]
    #[display(fmt = "failed to decode field data as JSON: {}", _0)]
    DecodeJson(serde_json::Error),
}

impl Error {
    /// Returns the numeric status the legacy upload handler reported for this
    /// failure, `-1` through `-9` in pipeline order.
    ///
    /// Failures the legacy handler could not detect have no code.
    pub fn legacy_code(&self) -> Option<i32> {
        let code = match self {
            Error::MissingContentTypeHeader => -1,
            Error::MissingBoundaryParameter { .. } => -2,
            Error::MissingHeaderBodySeparator => -3,
            Error::NotFormData { .. } => -4,
            Error::MissingNameAttribute { .. } => -5,
            Error::UnterminatedNameAttribute { .. } => -6,
            Error::MissingFilenameAttribute { .. } => -7,
            Error::UnterminatedFilenameAttribute { .. } => -8,
            Error::MissingPartContentType { .. } => -9,
            _ => return None,
        };

        Some(code)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PersistenceFailure { cause, .. } => Some(cause),
            #[cfg(feature = "json")]
            Error::DecodeJson(err) => Some(err),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string().eq(&other.to_string())
    }
}

impl Eq for Error {}
