use std::{fmt::Display, hash::Hash};

use crate::error::Error;

#[derive(Debug, Clone, Default)]
pub struct ResponseHeader {
    pub version: String,
    pub status_code: u16,
    pub reason_phrase: String,
    pub fields: HeaderFields,
}

impl ResponseHeader {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        super::parse::parse_response_header(data)
    }

    pub fn is_informational(&self) -> bool {
        (100..200).contains(&self.status_code)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Ordered header fields with case-insensitive names.
#[derive(Debug, Clone, Default)]
pub struct HeaderFields {
    inner: Vec<(FieldName, String)>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (FieldName, String)> {
        self.inner.iter()
    }

    pub fn contains_key<K: Into<FieldName>>(&self, key: K) -> bool {
        let key = key.into();
        self.inner.iter().any(|(k, _v)| k == &key)
    }

    pub fn get<K: Into<FieldName>>(&self, key: K) -> Option<&str> {
        let key = key.into();
        self.inner
            .iter()
            .find_map(|(k, v)| if k == &key { Some(v.as_str()) } else { None })
    }

    /// Replaces every field named `key` with a single field.
    pub fn insert<K: Into<FieldName>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();

        if let Some(position) = self.inner.iter().position(|(k, _v)| k == &key) {
            self.inner.retain(|(k, _v)| k != &key);
            self.inner.insert(position, (key, value.into()));
        } else {
            self.append(key, value);
        }
    }

    pub fn append<K: Into<FieldName>, V: Into<String>>(&mut self, key: K, value: V) {
        self.inner.push((key.into(), value.into()));
    }
}

impl<'a> IntoIterator for &'a HeaderFields {
    type Item = &'a (FieldName, String);
    type IntoIter = std::slice::Iter<'a, (FieldName, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[derive(Debug, Clone)]
pub struct FieldName {
    inner: String,
    normalized: String,
}

impl FieldName {
    pub fn new<T: Into<String>>(name: T) -> Self {
        let inner = name.into();
        let normalized = inner.to_ascii_lowercase();

        Self { inner, normalized }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&FieldName> for FieldName {
    fn from(value: &FieldName) -> Self {
        value.to_owned()
    }
}

impl PartialEq for FieldName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for FieldName {}

impl Hash for FieldName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}
