use crate::size_limit::SizeLimit;

/// Represents some rules to be applied on the request body and the extracted field.
///
/// The defaults accept any field name of any size, which leaves the parsing
/// pipeline's behavior untouched.
///
/// # Examples
///
/// ```
/// use upload_field::{Constraints, MultipartParser, SizeLimit};
///
/// let constraints = Constraints::new()
///     .allowed_fields(vec!["avatar", "document"])
///     .size_limit(
///         SizeLimit::new()
///             .whole_body(15 * 1024 * 1024)
///             .per_field(10 * 1024 * 1024)
///             .for_field("avatar", 1024 * 1024),
///     );
///
/// let parser = MultipartParser::with_constraints(constraints);
/// # drop(parser);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub(crate) size_limit: SizeLimit,
    pub(crate) allowed_fields: Option<Vec<String>>,
}

impl Constraints {
    /// Creates a set of rules with default behaviour.
    pub fn new() -> Constraints {
        Constraints::default()
    }

    /// Applies rules on the request body and field size.
    pub fn size_limit(mut self, size_limit: SizeLimit) -> Constraints {
        self.size_limit = size_limit;
        self
    }

    /// Specifies which field names are accepted. Any other name is rejected
    /// with [`Error::UnknownField`](crate::Error::UnknownField).
    pub fn allowed_fields<N: Into<String>>(mut self, allowed_fields: Vec<N>) -> Constraints {
        let allowed_fields = allowed_fields.into_iter().map(|item| item.into()).collect();
        self.allowed_fields = Some(allowed_fields);
        self
    }

    pub(crate) fn is_it_allowed(&self, field: &str) -> bool {
        match self.allowed_fields {
            Some(ref allowed_fields) => allowed_fields.iter().any(|item| item == field),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_it_allowed() {
        let constraints = Constraints::new();
        assert!(constraints.is_it_allowed("anything"));

        let constraints = Constraints::new().allowed_fields(vec!["a", "b"]);
        assert!(constraints.is_it_allowed("a"));
        assert!(constraints.is_it_allowed("b"));
        assert!(!constraints.is_it_allowed("c"));
        assert!(!constraints.is_it_allowed(""));
    }
}
