use super::error::Result;
use super::fetch::{HeaderFetcher, SourceFetcher};
use super::parser::parse_headers;
use super::types::*;
use indexmap::IndexMap;
use serde::Serialize;

/// `X-Robots-Tag` directives of one response, keyed by user-agent token.
///
/// Built once from the response headers and never mutated afterwards, so a
/// table can be shared across threads and queried freely.
///
/// Queries resolve a user-agent in this order, first hit wins:
/// 1. the exact token,
/// 2. the shortest registered `prefix*` token matching the agent,
/// 3. the universal token `*`,
/// 4. otherwise no directive applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RobotsHeaderTable {
    directives: IndexMap<String, DirectiveRecord>,
}

impl RobotsHeaderTable {
    /// Build the table from in-memory response headers. Headers unrelated to
    /// robots directives are ignored; malformed robots headers yield a record
    /// with both flags off.
    pub fn create(headers: &RawHeaders) -> Self {
        Self {
            directives: parse_headers(headers),
        }
    }

    /// Fetch the response headers of `source` (URL or file path) with the
    /// default [`SourceFetcher`] and build the table from them.
    pub fn read_from(source: &str) -> Result<Self> {
        Self::read_with(source, &SourceFetcher::default())
    }

    /// Like [`read_from`](Self::read_from) with a caller-provided fetcher.
    pub fn read_with(source: &str, fetcher: &impl HeaderFetcher) -> Result<Self> {
        let headers = fetcher.fetch(source)?;
        Ok(Self::create(&headers))
    }

    pub fn may_index(&self, user_agent: &str) -> bool {
        !self.noindex(user_agent)
    }

    pub fn may_follow(&self, user_agent: &str) -> bool {
        !self.nofollow(user_agent)
    }

    pub fn noindex(&self, user_agent: &str) -> bool {
        self.directives_for(user_agent)
            .is_some_and(|record| record.noindex)
    }

    pub fn nofollow(&self, user_agent: &str) -> bool {
        self.directives_for(user_agent)
            .is_some_and(|record| record.nofollow)
    }

    /// The record that applies to `user_agent` after fallback, or `None` when
    /// nothing matches (everything allowed).
    pub fn directives_for(&self, user_agent: &str) -> Option<&DirectiveRecord> {
        self.directives
            .get(user_agent)
            .or_else(|| {
                self.wildcard_user_agent(user_agent)
                    .and_then(|token| self.directives.get(token))
            })
            .or_else(|| self.directives.get(ALL_USER_AGENTS))
    }

    /// Exact-token lookup, no fallback.
    pub fn get(&self, user_agent: &str) -> Option<&DirectiveRecord> {
        self.directives.get(user_agent)
    }

    /// Registered user-agent tokens in the order they were first seen.
    pub fn user_agents(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Find the registered `prefix*` token for `user_agent`, trying prefixes
    /// from one character up to the whole agent.
    ///
    /// The shortest matching prefix wins: with `go*` and `googlebot*` both
    /// registered, `googlebot-news` resolves to `go*`.
    fn wildcard_user_agent(&self, user_agent: &str) -> Option<&str> {
        if user_agent == ALL_USER_AGENTS {
            return None;
        }

        let mut candidate = String::with_capacity(user_agent.len() + 1);
        for (idx, ch) in user_agent.char_indices() {
            candidate.clear();
            candidate.push_str(&user_agent[..idx + ch.len_utf8()]);
            candidate.push('*');
            if let Some((token, _)) = self.directives.get_key_value(candidate.as_str()) {
                return Some(token.as_str());
            }
        }
        None
    }
}

impl From<&RawHeaders> for RobotsHeaderTable {
    fn from(headers: &RawHeaders) -> Self {
        Self::create(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn table(headers: &[(&str, &str)]) -> RobotsHeaderTable {
        RobotsHeaderTable::create(&headers.iter().copied().collect::<RawHeaders>())
    }

    #[test]
    fn no_robots_headers_allows_everything() {
        let t = table(&[("Content-Type", "text/html"), ("Server", "nginx")]);
        assert!(t.is_empty());
        for ua in ["*", "googlebot", "bingbot", ""] {
            assert!(t.may_index(ua));
            assert!(t.may_follow(ua));
        }
    }

    #[test]
    fn universal_directive_applies_to_every_agent() {
        let t = table(&[("X-Robots-Tag", "noindex")]);
        assert!(t.noindex("*"));
        assert!(t.noindex("anything"));
        assert!(!t.nofollow("anything"));
        assert!(t.may_follow("*"));
    }

    #[test]
    fn agent_directive_does_not_leak_to_other_agents() {
        let t = table(&[("X-Robots-Tag", "googlebot: nofollow")]);
        assert!(t.nofollow("googlebot"));
        assert!(!t.may_follow("googlebot"));
        assert!(!t.nofollow("bingbot"));
        assert!(!t.nofollow("*"));
    }

    #[test]
    fn exact_entry_beats_universal_entry() {
        let headers = RawHeaders::from([
            ("X-Robots-Tag", HeaderValue::from("googlebot: nofollow")),
            ("0", HeaderValue::from("X-Robots-Tag: noindex")),
        ]);
        let t = RobotsHeaderTable::create(&headers);
        assert!(!t.noindex("googlebot"));
        assert!(t.nofollow("googlebot"));
        assert!(t.noindex("bingbot"));
        assert!(!t.nofollow("bingbot"));
    }

    #[test]
    fn wildcard_entry_beats_universal_entry() {
        let headers = RawHeaders::from_lines([
            "X-Robots-Tag: google*: noindex",
            "X-Robots-Tag: nofollow",
        ]);
        let t = RobotsHeaderTable::create(&headers);
        assert!(t.noindex("googlebot"));
        assert!(!t.nofollow("googlebot"));
        assert!(!t.noindex("bingbot"));
        assert!(t.nofollow("bingbot"));
    }

    #[test]
    fn wildcard_prefix_covers_the_full_agent_name() {
        let headers = RawHeaders::from_lines(["X-Robots-Tag: googlebot*: noindex"]);
        let t = RobotsHeaderTable::create(&headers);
        assert!(t.noindex("googlebot"));
        assert!(!t.noindex("google"));
    }

    // Shortest registered prefix wins, even when a longer, more specific one
    // exists. Changing this changes which crawlers are blocked.
    #[test]
    fn shortest_wildcard_prefix_wins() {
        let headers = RawHeaders::from_lines([
            "X-Robots-Tag: go*: noindex",
            "X-Robots-Tag: googlebot*: nofollow",
        ]);
        let t = RobotsHeaderTable::create(&headers);
        assert_eq!(t.wildcard_user_agent("googlebot-news"), Some("go*"));
        assert!(t.noindex("googlebot-news"));
        assert!(!t.nofollow("googlebot-news"));
    }

    #[test]
    fn universal_query_skips_wildcard_lookup() {
        let headers = RawHeaders::from_lines(["X-Robots-Tag: **: noindex"]);
        let t = RobotsHeaderTable::create(&headers);
        assert_eq!(t.wildcard_user_agent("*"), None);
        assert!(!t.noindex("*"));
    }

    #[test]
    fn multibyte_agents_are_split_on_char_boundaries() {
        let headers = RawHeaders::from_lines(["X-Robots-Tag: bö*: nofollow"]);
        let t = RobotsHeaderTable::create(&headers);
        assert!(t.nofollow("böt"));
        assert!(!t.nofollow("bot"));
    }

    #[test]
    fn repeated_values_are_joined_before_parsing() {
        let mut headers = RawHeaders::new();
        headers.insert("X-Robots-Tag", ["googlebot: noindex", "nofollow"]);
        let t = RobotsHeaderTable::create(&headers);
        assert_eq!(t.user_agents().collect::<Vec<_>>(), ["googlebot"]);
        assert!(t.noindex("googlebot"));
        assert!(t.nofollow("googlebot"));
        assert!(t.may_index("*"));
    }

    #[test]
    fn directives_for_reports_resolved_record() {
        let t = table(&[("X-Robots-Tag", "googlebot: noindex, nofollow")]);
        assert_eq!(
            t.directives_for("googlebot"),
            Some(&DirectiveRecord {
                noindex: true,
                nofollow: true
            })
        );
        assert_eq!(t.directives_for("bingbot"), None);
        assert_eq!(t.get("googlebot*"), None);
    }

    #[test]
    fn queries_are_repeatable() {
        let t = table(&[("X-Robots-Tag", "go*: noindex")]);
        let first = (t.may_index("googlebot"), t.may_follow("googlebot"));
        for _ in 0..3 {
            assert_eq!((t.may_index("googlebot"), t.may_follow("googlebot")), first);
        }
    }

    #[test]
    fn read_with_uses_the_given_fetcher() {
        let fetcher = |source: &str| -> Result<RawHeaders> {
            assert_eq!(source, "https://example.com/");
            Ok(RawHeaders::from([("X-Robots-Tag", "noindex")]))
        };
        let t = RobotsHeaderTable::read_with("https://example.com/", &fetcher).unwrap();
        assert!(!t.may_index("*"));
    }

    #[test]
    fn read_with_propagates_fetch_errors() {
        let fetcher =
            |source: &str| -> Result<RawHeaders> { Err(Error::fetch(source, "unreachable")) };
        let err = RobotsHeaderTable::read_with("https://example.invalid/", &fetcher).unwrap_err();
        assert!(err.is_fetch());
    }

    #[test]
    fn serializes_as_agent_map() {
        let t = table(&[("X-Robots-Tag", "googlebot: noindex")]);
        let yaml = serde_yaml::to_string(&t).unwrap();
        assert_eq!(yaml, "googlebot:\n  noindex: true\n  nofollow: false\n");
    }
}
