use super::HeaderValue;
use indexmap::IndexMap;
use serde::Deserialize;

/// Response headers as handed over by an HTTP client: header name → value.
///
/// Names are kept exactly as supplied; robots filtering compares them
/// case-insensitively. Iteration follows insertion order, which decides
/// which header wins when two of them target the same user-agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawHeaders(IndexMap<String, HeaderValue>);

impl RawHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep raw `Name: value` response lines unsplit, keyed by position.
    ///
    /// This is the shape of a plain header-line list (status line included),
    /// where robots directives are only recognisable from the line content.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| (idx.to_string(), HeaderValue::Single(line.into())))
            .collect()
    }

    /// Set `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<HeaderValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Record one more line of a repeated header.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.0.entry(name.into()) {
            indexmap::map::Entry::Occupied(mut entry) => entry.get_mut().push(value),
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(HeaderValue::Single(value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for RawHeaders
where
    K: Into<String>,
    V: Into<HeaderValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for RawHeaders
where
    K: Into<String>,
    V: Into<HeaderValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
