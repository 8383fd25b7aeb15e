pub(crate) const DEFAULT_WHOLE_BODY_SIZE_LIMIT: u64 = u64::MAX;
pub(crate) const DEFAULT_PER_FIELD_SIZE_LIMIT: u64 = u64::MAX;

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const BOUNDARY_PARAM: &str = "boundary=";

pub(crate) const BOUNDARY_EXT: &str = "--";
pub(crate) const CRLF: &str = "\r\n";
pub(crate) const CRLF_CRLF: &str = "\r\n\r\n";
pub(crate) const QUOTE: &str = "\"";

pub(crate) const FORM_DATA_DISPOSITION: &str = "Content-Disposition: form-data;";
pub(crate) const NAME_ATTR: &str = "name=\"";
pub(crate) const FILE_NAME_ATTR: &str = "filename=\"";
pub(crate) const PART_CONTENT_TYPE: &str = "Content-Type: ";

/// Bytes of `\r\n--` in front of a matched boundary.
pub(crate) const BOUNDARY_PREFIX_LEN: usize = CRLF.len() + BOUNDARY_EXT.len();

/// Bytes of `\r\n--<boundary>--` that are not the boundary itself.
pub(crate) const CLOSING_DELIMITER_OVERHEAD: usize = CRLF.len() + 2 * BOUNDARY_EXT.len();
