use crate::content_disposition::ContentDisposition;
use crate::request::RequestSource;
use crate::MultipartParser;
use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
#[cfg(feature = "json")]
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// A single field extracted from a `multipart/form-data` request body.
///
/// An instance is request-scoped: it is filled by one parse, read by the caller and
/// then dropped or [`reset`](UploadField::reset) for the next request. After a parse
/// either the field data or the [`error`](UploadField::error) is populated, never both.
///
/// # Examples
///
/// ```
/// use upload_field::{RawRequest, UploadField};
///
/// let body = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"doc\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nabcd\r\n--X-BOUNDARY--";
/// let req = RawRequest::new(body).with_header("Content-Type", "multipart/form-data; boundary=X-BOUNDARY");
///
/// let mut field = UploadField::new();
/// assert!(field.parse(&req));
/// assert_eq!(field.name(), "doc");
/// assert_eq!(field.bytes().as_ref(), b"abcd");
///
/// field.reset();
/// assert!(field.bytes().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct UploadField {
    boundary: String,
    content: Bytes,
    content_length: usize,
    field_name: String,
    file_name: String,
    content_type: String,
    pub(crate) error: Option<crate::Error>,
}

impl UploadField {
    /// Creates an empty field, ready for [`parse`](UploadField::parse).
    pub fn new() -> UploadField {
        UploadField::default()
    }

    pub(crate) fn from_parts(boundary: String, content: Bytes, cd: ContentDisposition) -> UploadField {
        UploadField {
            boundary,
            content_length: content.len(),
            content,
            field_name: cd.field_name,
            file_name: cd.file_name,
            content_type: cd.content_type,
            error: None,
        }
    }

    /// Restores the field to its empty initial state.
    pub fn reset(&mut self) {
        *self = UploadField::default();
    }

    /// Parses `request` into this field with the default [`Constraints`](crate::Constraints).
    ///
    /// Returns `true` on success. On failure the field holds only the error,
    /// available through [`error`](UploadField::error).
    pub fn parse<R: RequestSource + ?Sized>(&mut self, request: &R) -> bool {
        MultipartParser::new().parse_into(self, request)
    }

    /// The boundary token taken from the request `Content-Type`, without the leading `--`.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The `name` attribute of the part's `Content-Disposition`.
    pub fn name(&self) -> &str {
        &self.field_name
    }

    /// The `filename` attribute of the part's `Content-Disposition`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The part's own `Content-Type` value, verbatim.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The part's `Content-Type` as a [`mime::Mime`], if it parses as one.
    pub fn mime_type(&self) -> Option<mime::Mime> {
        self.content_type.parse::<mime::Mime>().ok()
    }

    /// The raw field content.
    pub fn bytes(&self) -> &Bytes {
        &self.content
    }

    /// The length of the field content in bytes.
    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// The error of the last parse, if it failed.
    pub fn error(&self) -> Option<&crate::Error> {
        self.error.as_ref()
    }

    /// Takes the error of the last parse out of the field.
    pub fn take_error(&mut self) -> Option<crate::Error> {
        self.error.take()
    }

    /// Whether the field holds the result of a successful parse.
    pub fn is_parsed(&self) -> bool {
        self.error.is_none() && !self.boundary.is_empty()
    }

    /// Decodes the content as text, using the `charset` of the part's
    /// `Content-Type` or UTF-8.
    pub fn text(&self) -> String {
        self.text_with_charset("utf-8")
    }

    /// Decodes the content as text, using the `charset` of the part's
    /// `Content-Type` or `default_encoding` when it has none.
    ///
    /// Unknown encodings fall back to UTF-8, and malformed sequences are replaced.
    pub fn text_with_charset(&self, default_encoding: &str) -> String {
        let content_type = self.mime_type();

        let encoding_name = content_type
            .as_ref()
            .and_then(|mime| mime.get_param(mime::CHARSET))
            .map(|charset| charset.as_str())
            .unwrap_or(default_encoding);

        let encoding = Encoding::for_label(encoding_name.as_bytes()).unwrap_or(UTF_8);

        let (text, _, _) = encoding.decode(&self.content);

        text.into_owned()
    }

    /// Deserializes the content as `JSON`.
    ///
    /// # Optional
    ///
    /// This requires the optional `json` feature to be enabled.
    #[cfg(feature = "json")]
    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        serde_json::from_slice(&self.content).map_err(crate::Error::DecodeJson)
    }

    /// Writes the content to `path`, creating or truncating the file.
    ///
    /// Returns `false` if the field has no content or the file could not be
    /// written completely. The failure is logged.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> bool {
        match self.persist(path) {
            Ok(_) => true,
            Err(err) => {
                log::error!("{}", err);
                false
            }
        }
    }

    /// Writes the content to `path`, creating or truncating the file, and
    /// returns the number of bytes written.
    ///
    /// The data is synced to disk before returning, so write-back failures
    /// are reported rather than lost when the file is closed.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> crate::Result<u64> {
        let path = path.as_ref();
        let failure = |cause: io::Error| crate::Error::PersistenceFailure {
            path: path.to_path_buf(),
            cause,
        };

        self.check_persistable().map_err(failure)?;

        let mut file = File::create(path).map_err(failure)?;
        file.write_all(&self.content).map_err(failure)?;
        file.sync_all().map_err(failure)?;

        log::debug!("saved {} bytes of field '{}' to {}", self.content_length, self.field_name, path.display());

        Ok(self.content_length as u64)
    }

    /// Writes the content to `path` asynchronously, see [`save_to_file`](UploadField::save_to_file).
    ///
    /// # Optional
    ///
    /// This requires the optional `tokio-io` feature to be enabled.
    #[cfg(feature = "tokio-io")]
    pub async fn save_to_file_async<P: AsRef<Path>>(&self, path: P) -> bool {
        match self.persist_async(path).await {
            Ok(_) => true,
            Err(err) => {
                log::error!("{}", err);
                false
            }
        }
    }

    /// Writes the content to `path` asynchronously, see [`persist`](UploadField::persist).
    ///
    /// # Optional
    ///
    /// This requires the optional `tokio-io` feature to be enabled.
    #[cfg(feature = "tokio-io")]
    pub async fn persist_async<P: AsRef<Path>>(&self, path: P) -> crate::Result<u64> {
        use tokio::io::AsyncWriteExt;

        let path = path.as_ref();
        let failure = |cause: io::Error| crate::Error::PersistenceFailure {
            path: path.to_path_buf(),
            cause,
        };

        self.check_persistable().map_err(failure)?;

        let mut file = tokio::fs::File::create(path).await.map_err(failure)?;
        file.write_all(&self.content).await.map_err(failure)?;
        file.sync_all().await.map_err(failure)?;

        Ok(self.content_length as u64)
    }

    fn check_persistable(&self) -> io::Result<()> {
        if let Some(ref err) = self.error {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("field failed to parse: {}", err),
            ));
        }

        if self.content.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "field has no content"));
        }

        if self.content.len() != self.content_length {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "field content is {} bytes but its length is recorded as {}",
                    self.content.len(),
                    self.content_length
                ),
            ));
        }

        Ok(())
    }
}
