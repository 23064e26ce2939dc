use super::types::RawHeaders;
use aho_corasick::AhoCorasick;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Name of the robots response header, lower-cased.
pub(crate) const ROBOTS_HEADER: &str = "x-robots-tag";

/// Case-insensitive finder for `x-robots-tag` inside header values.
static ROBOTS_MARKER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build([ROBOTS_HEADER])
        .expect("single literal pattern")
});

/// Why a header was selected for directive parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Selected {
    /// The header name starts with `x-robots-tag`.
    ByName,
    /// Only the value mentions `x-robots-tag` (an unsplit header line, or a
    /// proxy folding the robots line into another header).
    ByValue,
}

/// A header that passed the robots prefilter, with its value already
/// normalized to one string.
#[derive(Debug)]
pub(crate) struct RobotsHeader<'a> {
    pub name: &'a str,
    pub value: Cow<'a, str>,
    pub selected: Selected,
}

impl<'a> RobotsHeader<'a> {
    /// The text the directive parser splits on `:`.
    ///
    /// Name-selected headers are re-joined as `name: value` so that
    /// `X-Robots-Tag: googlebot: noindex` reads the same whether it arrives
    /// split or as a raw line. Value-selected headers already carry the name.
    pub fn content(&self) -> Cow<'_, str> {
        match self.selected {
            Selected::ByName => Cow::Owned(format!("{}: {}", self.name, self.value)),
            Selected::ByValue => Cow::Borrowed(self.value.as_ref()),
        }
    }
}

/// Decide whether a header carries robots directives.
pub(crate) fn select(name: &str, value: &str) -> Option<Selected> {
    let name_matches = name
        .get(..ROBOTS_HEADER.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ROBOTS_HEADER));

    if name_matches {
        Some(Selected::ByName)
    } else if ROBOTS_MARKER.is_match(value) {
        Some(Selected::ByValue)
    } else {
        None
    }
}

/// Iterate the robots-relevant headers in insertion order.
pub(crate) fn robots_headers(headers: &RawHeaders) -> impl Iterator<Item = RobotsHeader<'_>> {
    headers.iter().filter_map(|(name, value)| {
        let value = value.joined();
        match select(name, &value) {
            Some(selected) => Some(RobotsHeader {
                name,
                value,
                selected,
            }),
            None => {
                log::trace!("skipping non-robots header `{}`", name);
                None
            }
        }
    })
}
