use crate::constants;
use crate::helpers;
use std::ops::Range;

/// A fully received request body, indexed by the pipeline stages.
pub(crate) struct BodyBuffer<'a> {
    pub(crate) buf: &'a [u8],
}

impl<'a> BodyBuffer<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        BodyBuffer { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Splits off the part headers at the first blank line.
    ///
    /// Returns the header block and the offset where the content begins.
    pub fn read_header_block(&self) -> crate::Result<(&'a [u8], usize)> {
        let idx = helpers::find_bytes_from(self.buf, constants::CRLF_CRLF.as_bytes(), 0)
            .ok_or(crate::Error::MissingHeaderBodySeparator)?;

        Ok((&self.buf[..idx], idx + constants::CRLF_CRLF.len()))
    }

    /// Resolves the content range starting at `start`.
    ///
    /// The content ends right before the `\r\n--` preceding the next boundary
    /// occurrence. Without one, the body is assumed to end with exactly
    /// `\r\n--<boundary>--`.
    pub fn content_range(&self, start: usize, boundary: &str) -> crate::Result<Range<usize>> {
        let body_len = self.len();

        let end = match helpers::find_bytes_from(self.buf, boundary.as_bytes(), start) {
            Some(idx) => {
                log::trace!("boundary found at offset {}", idx);
                idx.checked_sub(constants::BOUNDARY_PREFIX_LEN)
            }
            None => {
                log::warn!(
                    "no boundary after content start {}, assuming a trailing `--{}--` delimiter",
                    start,
                    boundary
                );
                body_len
                    .checked_sub(boundary.len())
                    .and_then(|len| len.checked_sub(constants::CLOSING_DELIMITER_OVERHEAD))
            }
        };

        match end {
            Some(end) if start <= end && end <= body_len => {
                log::trace!("content range resolved to {}..{}", start, end);
                Ok(start..end)
            }
            end => Err(crate::Error::MalformedContentRange { start, end, body_len }),
        }
    }

    pub fn read_range(&self, range: Range<usize>) -> &'a [u8] {
        &self.buf[range]
    }
}
