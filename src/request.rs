use bytes::Bytes;
use std::borrow::Cow;
use std::collections::HashMap;

/// The parts of an HTTP request the parser reads: a header lookup and the
/// fully buffered body.
pub trait RequestSource {
    /// Returns the value of the header `name`, if present.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Returns the entire request content.
    fn body(&self) -> &[u8];
}

impl<T: RequestSource + ?Sized> RequestSource for &T {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).header(name)
    }

    fn body(&self) -> &[u8] {
        (**self).body()
    }
}

/// Header lookup follows [`http::HeaderMap`], so it ignores case. Values are
/// decoded as UTF-8, with invalid sequences replaced.
impl<B: AsRef<[u8]>> RequestSource for http::Request<B> {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers()
            .get(name)
            .map(|val| String::from_utf8_lossy(val.as_bytes()))
    }

    fn body(&self) -> &[u8] {
        http::Request::body(self).as_ref()
    }
}

/// A buffered request with a case-sensitive header map, for hosts that do not
/// use the [`http`] types.
///
/// # Examples
///
/// ```
/// use upload_field::{RawRequest, RequestSource};
///
/// let req = RawRequest::new("--X\r\n").with_header("Content-Type", "multipart/form-data; boundary=X");
///
/// assert_eq!(req.header("Content-Type").as_deref(), Some("multipart/form-data; boundary=X"));
/// assert_eq!(req.header("content-type").as_deref(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    headers: HashMap<String, String>,
    body: Bytes,
}

impl RawRequest {
    /// Creates a request with the given body and no headers.
    pub fn new<B: Into<Bytes>>(body: B) -> RawRequest {
        RawRequest {
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header, replacing any previous value under the same key.
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> RawRequest {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl RequestSource for RawRequest {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(|val| Cow::Borrowed(val.as_str()))
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}
