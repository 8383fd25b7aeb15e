use crate::constants;
use crate::helpers;

/// Attributes read from a part's header block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ContentDisposition {
    pub(crate) field_name: String,
    pub(crate) file_name: String,
    pub(crate) content_type: String,
}

impl ContentDisposition {
    /// Scans the header block with plain substring searches, in a fixed order:
    /// the `form-data` disposition, `name`, `filename`, then the part `Content-Type`.
    pub fn parse(headers: &str) -> crate::Result<ContentDisposition> {
        if helpers::find_str_from(headers, constants::FORM_DATA_DISPOSITION, 0).is_none() {
            return Err(crate::Error::NotFormData {
                headers: headers.to_owned(),
            });
        }

        let field_name = match helpers::quoted_attribute(headers, constants::NAME_ATTR) {
            Some(Some(name)) => name.to_owned(),
            Some(None) => {
                return Err(crate::Error::UnterminatedNameAttribute {
                    headers: headers.to_owned(),
                })
            }
            None => {
                return Err(crate::Error::MissingNameAttribute {
                    headers: headers.to_owned(),
                })
            }
        };

        let file_name = match helpers::quoted_attribute(headers, constants::FILE_NAME_ATTR) {
            Some(Some(file_name)) => file_name.to_owned(),
            Some(None) => {
                return Err(crate::Error::UnterminatedFilenameAttribute {
                    headers: headers.to_owned(),
                })
            }
            None => {
                return Err(crate::Error::MissingFilenameAttribute {
                    headers: headers.to_owned(),
                })
            }
        };

        let content_type = Self::parse_content_type(headers).ok_or_else(|| crate::Error::MissingPartContentType {
            headers: headers.to_owned(),
        })?;

        Ok(ContentDisposition {
            field_name,
            file_name,
            content_type: content_type.to_owned(),
        })
    }

    // The value runs to the next CRLF, or to the end of the block when it is the last line.
    fn parse_content_type(headers: &str) -> Option<&str> {
        let start = helpers::find_str_from(headers, constants::PART_CONTENT_TYPE, 0)?;
        let start = start + constants::PART_CONTENT_TYPE.len();

        match helpers::find_str_from(headers, constants::CRLF, start) {
            Some(end) => Some(&headers[start..end]),
            None => Some(&headers[start..]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "--X\r\nContent-Disposition: form-data; name=\"my_field\"; filename=\"file abc.txt\"\r\nContent-Type: text/plain";

    #[test]
    fn test_parse_full_headers() {
        let cd = ContentDisposition::parse(FULL).unwrap();
        assert_eq!(cd.field_name, "my_field");
        assert_eq!(cd.file_name, "file abc.txt");
        assert_eq!(cd.content_type, "text/plain");
    }

    #[test]
    fn test_content_type_before_disposition() {
        let headers = "--X\r\nContent-Type: image/png\r\nContent-Disposition: form-data; name=\"a\"; filename=\"b.png\"";
        let cd = ContentDisposition::parse(headers).unwrap();
        assert_eq!(cd.content_type, "image/png");
        assert_eq!(cd.field_name, "a");
        assert_eq!(cd.file_name, "b.png");
    }

    #[test]
    fn test_unicode_attributes() {
        let headers = "Content-Disposition: form-data; name=\"কখগ\"; filename=\"你好.txt\"\r\nContent-Type: text/plain; charset=utf-8";
        let cd = ContentDisposition::parse(headers).unwrap();
        assert_eq!(cd.field_name, "কখগ");
        assert_eq!(cd.file_name, "你好.txt");
        assert_eq!(cd.content_type, "text/plain; charset=utf-8");
    }

    #[test]
    fn test_name_matches_inside_filename_when_first() {
        let headers = "Content-Disposition: form-data; filename=\"a.txt\"; name=\"field\"\r\nContent-Type: text/plain";
        let cd = ContentDisposition::parse(headers).unwrap();
        assert_eq!(cd.field_name, "a.txt");
        assert_eq!(cd.file_name, "a.txt");
    }

    #[test]
    fn test_not_form_data() {
        let headers = "Content-Disposition: inline; name=\"a\"; filename=\"b\"\r\nContent-Type: text/plain";
        assert!(matches!(
            ContentDisposition::parse(headers),
            Err(crate::Error::NotFormData { .. })
        ));

        // The match is case-sensitive and requires the trailing semicolon.
        let headers = "content-disposition: form-data; name=\"a\"";
        assert!(matches!(
            ContentDisposition::parse(headers),
            Err(crate::Error::NotFormData { .. })
        ));
        let headers = "Content-Disposition: form-data";
        assert!(matches!(
            ContentDisposition::parse(headers),
            Err(crate::Error::NotFormData { .. })
        ));
    }

    #[test]
    fn test_name_errors() {
        let headers = "Content-Disposition: form-data; id=\"a\"";
        assert_eq!(
            ContentDisposition::parse(headers).unwrap_err(),
            crate::Error::MissingNameAttribute {
                headers: headers.to_owned()
            }
        );

        let headers = "Content-Disposition: form-data; name=\"a";
        assert_eq!(
            ContentDisposition::parse(headers).unwrap_err(),
            crate::Error::UnterminatedNameAttribute {
                headers: headers.to_owned()
            }
        );
    }

    #[test]
    fn test_filename_is_mandatory() {
        let headers = "Content-Disposition: form-data; name=\"a\"\r\nContent-Type: text/plain";
        assert_eq!(
            ContentDisposition::parse(headers).unwrap_err(),
            crate::Error::MissingFilenameAttribute {
                headers: headers.to_owned()
            }
        );

        let headers = "Content-Disposition: form-data; name=\"a\"; filename=\"b.txt";
        assert_eq!(
            ContentDisposition::parse(headers).unwrap_err(),
            crate::Error::UnterminatedFilenameAttribute {
                headers: headers.to_owned()
            }
        );
    }

    #[test]
    fn test_missing_part_content_type() {
        let headers = "Content-Disposition: form-data; name=\"a\"; filename=\"b.txt\"";
        assert_eq!(
            ContentDisposition::parse(headers).unwrap_err(),
            crate::Error::MissingPartContentType {
                headers: headers.to_owned()
            }
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Missing name, filename and Content-Type: only the name is reported.
        let headers = "Content-Disposition: form-data;";
        assert!(matches!(
            ContentDisposition::parse(headers),
            Err(crate::Error::MissingNameAttribute { .. })
        ));
    }
}
