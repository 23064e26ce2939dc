use serde::Deserialize;
use std::borrow::Cow;

/// The value of one response header: either a single line or the ordered
/// values of a header that was repeated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// All sub-values joined with `,`. Borrows when there is nothing to join.
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Self::Single(value) => Cow::Borrowed(value.as_str()),
            Self::Multiple(values) if values.len() == 1 => Cow::Borrowed(values[0].as_str()),
            Self::Multiple(values) => Cow::Owned(values.join(",")),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }

    pub(crate) fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Multiple(vec![first, value]);
            }
            Self::Multiple(values) => values.push(value),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

impl From<Vec<&str>> for HeaderValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HeaderValue {
    fn from(values: [&str; N]) -> Self {
        Self::Multiple(values.iter().map(|v| (*v).to_owned()).collect())
    }
}
