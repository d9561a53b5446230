//! Header collection and the codec between it and the native transport.
//!
//! Outgoing headers are kept as an insertion ordered list of name to one or
//! many values; the transport gets one `setRequestHeader` call per value.
//! Incoming headers arrive as the raw `getAllResponseHeaders()` blob and are
//! parsed into ordered [`HeaderTuple`]s, duplicates included.

use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::str::FromStr;

/// One `(name, value)` pair as reported by the transport.
pub type HeaderTuple = (String, String);

/// Value of an outgoing header entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValues {
    One(String),
    Many(Vec<String>),
}

impl HeaderValues {
    /// Iterate the values in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            HeaderValues::One(v) => std::slice::from_ref(v),
            HeaderValues::Many(vs) => vs,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for HeaderValues {
    fn from(v: &str) -> Self {
        HeaderValues::One(v.to_owned())
    }
}

impl From<String> for HeaderValues {
    fn from(v: String) -> Self {
        HeaderValues::One(v)
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(vs: Vec<String>) -> Self {
        HeaderValues::Many(vs)
    }
}

impl From<Vec<&str>> for HeaderValues {
    fn from(vs: Vec<&str>) -> Self {
        HeaderValues::Many(vs.into_iter().map(str::to_owned).collect())
    }
}

/// Ordered request header collection.
///
/// Names keep the casing they were first inserted with; lookups and updates
/// are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, HeaderValues)>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a header, replacing any existing entry with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<HeaderValues>) {
        let name = name.into();
        let value = value.into();

        if let Some((_, v)) = self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            *v = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Add a value, turning an existing entry into a multi-valued one.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some((_, values)) => match values {
                HeaderValues::Many(vs) => vs.push(value),
                HeaderValues::One(first) => {
                    let first = std::mem::take(first);
                    *values = HeaderValues::Many(vec![first, value]);
                }
            },
            None => self.entries.push((name, HeaderValues::One(value))),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValues> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &HeaderValues)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<HeaderValues>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Write `headers` through `set`, once per value.
///
/// Multi-valued entries produce one call per element with the same name, in
/// order. `set` is typically the transport's `setRequestHeader`.
pub fn serialize<F>(headers: &Headers, mut set: F)
where
    F: FnMut(&str, &str),
{
    for (name, values) in headers.entries() {
        for value in values.iter() {
            set(name, value);
        }
    }
}

/// Parse a raw `getAllResponseHeaders()` blob.
///
/// Lines are split on CR?LF and empty lines skipped. Each line splits at its
/// first colon into a trimmed name and trimmed value; a line without a colon
/// becomes an empty name with the whole trimmed line as value.
pub fn parse_raw_headers(raw: &str) -> Vec<HeaderTuple> {
    let mut tuples = Vec::new();

    for line in raw.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        let (name, value) = line.split_once(':').unwrap_or(("", line));
        tuples.push((name.trim().to_owned(), value.trim().to_owned()));
    }

    tuples
}

/// Convert parsed tuples into an [`http::HeaderMap`], keeping duplicates.
///
/// Tuples the `http` crate rejects are skipped.
pub fn to_header_map(tuples: &[HeaderTuple]) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(tuples.len());
    for (name, value) in tuples {
        match (HeaderName::from_str(name), HeaderValue::from_str(value)) {
            (Ok(n), Ok(v)) => {
                map.append(n, v);
            }
            _ => tracing::debug!(name = %name, "skipping header not representable in HeaderMap"),
        }
    }
    map
}
