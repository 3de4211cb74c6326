//! The signed header set sent with a login request.
//!
//! A login carries the complete set of headers the client signed, including
//! the `(request-target)` pseudo-header. That name is not a valid HTTP token,
//! so the set is kept as a plain multimap instead of an `http::HeaderMap`.
//! Names are case-insensitive and stored lowercased; values keep the order in
//! which they were supplied.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Header name → ordered values.
///
/// Deserializes from a JSON object whose values are either a single string
/// or a list of strings:
///
/// ```
/// use ociauth_model::SignedHeaders;
///
/// let headers: SignedHeaders = serde_json::from_str(
///     r#"{"(request-target)": "get /v1/auth/oci/login/dev", "Date": ["Tue, 01 Oct 2024"]}"#,
/// ).unwrap();
/// assert_eq!(headers.get("date"), Some("Tue, 01 Oct 2024"));
/// assert_eq!(headers.get_all("(request-target)").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignedHeaders(BTreeMap<String, Vec<String>>);

impl SignedHeaders {
    /// Create an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`.
    pub fn append(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0
            .entry(name.as_ref().to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// All values recorded for `name`, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.0
            .get(&name.to_ascii_lowercase())
            .map_or(&[][..], Vec::as_slice)
    }

    /// First value recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// Whether at least one value is recorded for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        !self.get_all(name).is_empty()
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, values)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K, V> FromIterator<(K, V)> for SignedHeaders
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for SignedHeaders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeadersVisitor;

        impl<'de> Visitor<'de> for HeadersVisitor {
            type Value = SignedHeaders;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of header names to a string or a list of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut headers = SignedHeaders::new();
                while let Some((name, values)) = map.next_entry::<String, OneOrMany>()? {
                    if name.is_empty() {
                        return Err(de::Error::custom("empty header name"));
                    }
                    match values {
                        OneOrMany::One(v) => headers.append(&name, v),
                        OneOrMany::Many(vs) => {
                            for v in vs {
                                headers.append(&name, v);
                            }
                        }
                    }
                }
                Ok(headers)
            }
        }

        deserializer.deserialize_map(HeadersVisitor)
    }
}
