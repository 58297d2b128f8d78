//! Request attributes evaluated by redirect conditions.

use url::form_urlencoded;

use super::condition::DeviceType;

/// Query parameters of a request, in arrival order.
///
/// Keeps the distinction between a flag-only parameter (`?ref`, value `None`)
/// and an explicitly empty one (`?ref=`, value `Some("")`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    /// Parses a raw query string (without the leading `?`).
    ///
    /// Names and values are percent-decoded. Malformed segments are decoded
    /// leniently rather than rejected.
    pub fn parse(raw: &str) -> Self {
        let pairs = raw
            .split('&')
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| {
                let has_value = segment.contains('=');
                let (name, value) = form_urlencoded::parse(segment.as_bytes()).next()?;
                Some((
                    name.into_owned(),
                    has_value.then(|| value.into_owned()),
                ))
            })
            .collect();

        Self { pairs }
    }

    /// Adds a parameter; later occurrences win on lookup.
    pub fn push(&mut self, name: impl Into<String>, value: Option<&str>) {
        self.pairs.push((name.into(), value.map(str::to_string)));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// Value of the last occurrence of `name`.
    ///
    /// Outer `None`: parameter absent. Inner `None`: present without a value.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.pairs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Copy without every occurrence of `name`.
    pub fn without(&self, name: &str) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .filter(|(key, _)| key != name)
                .cloned()
                .collect(),
        }
    }
}

/// Attributes derived from one redirect request.
///
/// Built once per request and only read afterwards, so a single context can be
/// evaluated against any number of rules concurrently.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    device: Option<DeviceType>,
    language: Option<String>,
    query: QueryParams,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: Option<DeviceType>) -> Self {
        self.device = device;
        self
    }

    pub fn with_language(mut self, language: Option<&str>) -> Self {
        self.language = language.map(str::to_string);
        self
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_query_param(mut self, name: &str, value: Option<&str>) -> Self {
        self.query.push(name, value);
        self
    }

    pub fn device(&self) -> Option<DeviceType> {
        self.device
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distinguishes_flag_and_empty() {
        let query = QueryParams::parse("flag&empty=&full=x");

        assert_eq!(query.get("flag"), Some(None));
        assert_eq!(query.get("empty"), Some(Some("")));
        assert_eq!(query.get("full"), Some(Some("x")));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn test_parse_decodes() {
        let query = QueryParams::parse("utm%20source=news+letter&q=a%26b");

        assert_eq!(query.get("utm source"), Some(Some("news letter")));
        assert_eq!(query.get("q"), Some(Some("a&b")));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let query = QueryParams::parse("ref=a&ref=b");
        assert_eq!(query.get("ref"), Some(Some("b")));
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        let query = QueryParams::parse("&&a=1&");
        assert_eq!(query.iter().count(), 1);
        assert!(QueryParams::parse("").is_empty());
    }

    #[test]
    fn test_without_removes_all_occurrences() {
        let query = QueryParams::parse("a=1&nostat&a=2&b").without("a");

        assert!(!query.contains("a"));
        assert!(query.contains("nostat"));
        assert!(query.contains("b"));
    }

    #[test]
    fn test_context_builders() {
        let context = RequestContext::new()
            .with_device(Some(DeviceType::Tablet))
            .with_language(Some("es-ES"))
            .with_query_param("ref", Some("x"));

        assert_eq!(context.device(), Some(DeviceType::Tablet));
        assert_eq!(context.language(), Some("es-ES"));
        assert_eq!(context.query().get("ref"), Some(Some("x")));
    }
}
