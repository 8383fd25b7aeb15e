use crate::buffer::BodyBuffer;
use crate::constants;
use crate::constraints::Constraints;
use crate::content_disposition::ContentDisposition;
use crate::request::RequestSource;
use crate::UploadField;
use bytes::Bytes;

/// Extracts the single field of a `multipart/form-data` request.
///
/// Parsing runs four stages in order, and the first failing stage decides the error:
///
/// 1. the boundary is taken from the request `Content-Type` header;
/// 2. the part headers are split from the content at the first blank line;
/// 3. the `Content-Disposition` name and filename and the part `Content-Type` are read;
/// 4. the content end is located at the next boundary occurrence, or inferred
///    from a trailing `\r\n--<boundary>--` when there is none.
///
/// The parser holds only its [`Constraints`], so one instance can serve any
/// number of requests concurrently.
///
/// # Examples
///
/// ```
/// use upload_field::MultipartParser;
///
/// let body = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"my_file\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nabcd\r\n--X-BOUNDARY--";
/// let req = http::Request::builder()
///     .header("Content-Type", "multipart/form-data; boundary=X-BOUNDARY")
///     .body(body)
///     .unwrap();
///
/// let field = MultipartParser::new().parse(&req).unwrap();
///
/// assert_eq!(field.name(), "my_file");
/// assert_eq!(field.file_name(), "a.txt");
/// assert_eq!(field.content_type(), "text/plain");
/// assert_eq!(field.text(), "abcd");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultipartParser {
    constraints: Constraints,
}

impl MultipartParser {
    /// Construct a new `MultipartParser` with default [`Constraints`].
    pub fn new() -> MultipartParser {
        MultipartParser::default()
    }

    /// Construct a new `MultipartParser` that enforces the given [`Constraints`].
    pub fn with_constraints(constraints: Constraints) -> MultipartParser {
        MultipartParser { constraints }
    }

    /// The rules this parser enforces.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Parses the request into a new [`UploadField`].
    pub fn parse<R: RequestSource + ?Sized>(&self, request: &R) -> crate::Result<UploadField> {
        let result = self.run(request);

        match result {
            Ok(ref field) => log::debug!(
                "parsed field '{}' (filename '{}', {} bytes)",
                field.name(),
                field.file_name(),
                field.content_length()
            ),
            Err(ref err) => log::debug!("failed to parse upload field (legacy code {:?}): {}", err.legacy_code(), err),
        }

        result
    }

    /// Resets `field` and parses the request into it.
    ///
    /// Returns `true` on success. On failure only the field's error is set.
    pub fn parse_into<R: RequestSource + ?Sized>(&self, field: &mut UploadField, request: &R) -> bool {
        field.reset();

        match self.parse(request) {
            Ok(parsed) => {
                *field = parsed;
                true
            }
            Err(err) => {
                field.error = Some(err);
                false
            }
        }
    }

    fn run<R: RequestSource + ?Sized>(&self, request: &R) -> crate::Result<UploadField> {
        let content_type = request
            .header(constants::CONTENT_TYPE)
            .ok_or(crate::Error::MissingContentTypeHeader)?;

        let boundary = crate::parse_boundary(content_type)?;

        let body = BodyBuffer::new(request.body());

        let body_limit = self.constraints.size_limit.whole_body;
        if body.len() as u64 > body_limit {
            return Err(crate::Error::BodySizeExceeded { limit: body_limit });
        }

        let (header_block, content_start) = body.read_header_block()?;
        log::trace!("part headers end, content starts at offset {}", content_start);

        let headers = String::from_utf8_lossy(header_block);
        let content_disposition = ContentDisposition::parse(&headers)?;

        if !self.constraints.is_it_allowed(&content_disposition.field_name) {
            return Err(crate::Error::UnknownField {
                field_name: content_disposition.field_name,
            });
        }

        let range = body.content_range(content_start, &boundary)?;

        let field_limit = self
            .constraints
            .size_limit
            .extract_size_limit_for(&content_disposition.field_name);
        if range.len() as u64 > field_limit {
            return Err(crate::Error::FieldSizeExceeded {
                limit: field_limit,
                field_name: content_disposition.field_name,
            });
        }

        let content = Bytes::copy_from_slice(body.read_range(range));

        Ok(UploadField::from_parts(boundary, content, content_disposition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawRequest, SizeLimit};

    const BODY: &str = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"a\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nHello world\r\n--X-BOUNDARY--";

    fn request(body: &'static str) -> RawRequest {
        RawRequest::new(body).with_header("Content-Type", "multipart/form-data; boundary=X-BOUNDARY")
    }

    #[test]
    fn test_missing_content_type_header() {
        let req = RawRequest::new(BODY);
        assert_eq!(
            MultipartParser::new().parse(&req).unwrap_err(),
            crate::Error::MissingContentTypeHeader
        );

        // Lookup is exact on raw requests.
        let req = RawRequest::new(BODY).with_header("content-type", "multipart/form-data; boundary=X-BOUNDARY");
        assert_eq!(
            MultipartParser::new().parse(&req).unwrap_err(),
            crate::Error::MissingContentTypeHeader
        );
    }

    #[test]
    fn test_non_ascii_boundary_from_http_request() {
        let value = http::HeaderValue::from_bytes("multipart/form-data; boundary=\u{e9}X".as_bytes()).unwrap();
        let body = "--\u{e9}X\r\nContent-Disposition: form-data; name=\"a\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nabc\r\n--\u{e9}X--";
        let req = http::Request::builder()
            .header("Content-Type", value)
            .body(body)
            .unwrap();

        let field = MultipartParser::new().parse(&req).unwrap();
        assert_eq!(field.boundary(), "\u{e9}X");
        assert_eq!(field.text(), "abc");

        // A present header without a boundary is not reported as missing.
        let value = http::HeaderValue::from_bytes(b"multipart/form-data; \xff").unwrap();
        let req = http::Request::builder()
            .header("Content-Type", value)
            .body(body)
            .unwrap();
        assert!(matches!(
            MultipartParser::new().parse(&req),
            Err(crate::Error::MissingBoundaryParameter { .. })
        ));
    }

    #[test]
    fn test_boundary_checked_before_body() {
        let req = RawRequest::new("no separator here").with_header("Content-Type", "multipart/form-data");
        assert!(matches!(
            MultipartParser::new().parse(&req),
            Err(crate::Error::MissingBoundaryParameter { .. })
        ));
    }

    #[test]
    fn test_attributes_checked_before_content_range() {
        // Neither a valid range nor a Content-Disposition: the disposition is reported.
        let req = request("X-BOUNDARY\r\n\r\nX-BOUNDARY");
        assert!(matches!(
            MultipartParser::new().parse(&req),
            Err(crate::Error::NotFormData { .. })
        ));
    }

    #[test]
    fn test_parse_into_keeps_error_only() {
        let mut field = UploadField::new();
        let parser = MultipartParser::new();

        assert!(parser.parse_into(&mut field, &request(BODY)));
        assert_eq!(field.text(), "Hello world");

        assert!(!parser.parse_into(&mut field, &RawRequest::new(BODY)));
        assert_eq!(field.error(), Some(&crate::Error::MissingContentTypeHeader));
        assert_eq!(field.name(), "");
        assert_eq!(field.boundary(), "");
        assert!(field.bytes().is_empty());
        assert_eq!(field.content_length(), 0);

        assert!(parser.parse_into(&mut field, &request(BODY)));
        assert!(field.error().is_none());
        assert_eq!(field.content_length(), 11);
    }

    #[test]
    fn test_body_size_limit() {
        let parser = MultipartParser::with_constraints(Constraints::new().size_limit(SizeLimit::new().whole_body(16)));
        assert_eq!(
            parser.parse(&request(BODY)).unwrap_err(),
            crate::Error::BodySizeExceeded { limit: 16 }
        );

        let parser = MultipartParser::with_constraints(
            Constraints::new().size_limit(SizeLimit::new().whole_body(BODY.len() as u64)),
        );
        assert!(parser.parse(&request(BODY)).is_ok());
    }

    #[test]
    fn test_field_size_limit() {
        let parser = MultipartParser::with_constraints(
            Constraints::new().size_limit(SizeLimit::new().per_field(100).for_field("a", 5)),
        );
        assert_eq!(
            parser.parse(&request(BODY)).unwrap_err(),
            crate::Error::FieldSizeExceeded {
                limit: 5,
                field_name: "a".to_owned()
            }
        );

        let parser = MultipartParser::with_constraints(Constraints::new().size_limit(SizeLimit::new().per_field(11)));
        assert_eq!(parser.parse(&request(BODY)).unwrap().content_length(), 11);
    }

    #[test]
    fn test_allowed_fields() {
        let parser = MultipartParser::with_constraints(Constraints::new().allowed_fields(vec!["b"]));
        assert_eq!(
            parser.parse(&request(BODY)).unwrap_err(),
            crate::Error::UnknownField {
                field_name: "a".to_owned()
            }
        );

        let parser = MultipartParser::with_constraints(Constraints::new().allowed_fields(vec!["a", "b"]));
        assert!(parser.parse(&request(BODY)).is_ok());
    }
}
