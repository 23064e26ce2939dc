use super::header_prefilter::robots_headers;
use super::types::{DirectiveRecord, RawHeaders, ALL_USER_AGENTS};
use aho_corasick::AhoCorasick;
use indexmap::IndexMap;
use std::sync::LazyLock;

const NOINDEX: usize = 0;
const NOFOLLOW: usize = 1;

/// Case-insensitive finder for the two directives we track. Pattern ids
/// match `NOINDEX` / `NOFOLLOW`.
static DIRECTIVES: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(["noindex", "nofollow"])
        .expect("static directive patterns")
});

/// Parse one robots header line into its user-agent token and flags.
///
/// The whole line is split on every `:`. Exactly three parts means the
/// middle one names the user-agent (`X-Robots-Tag: googlebot: noindex`);
/// anything else applies to all agents. An extra colon anywhere in the line
/// defeats the three-part rule, so such lines land on `*`.
pub(crate) fn parse_directive(content: &str) -> (String, DirectiveRecord) {
    let parts: Vec<&str> = content.split(':').collect();

    let user_agent = if parts.len() == 3 {
        parts[1].trim()
    } else {
        ALL_USER_AGENTS
    };

    // split() always yields at least one part.
    let options = parts.last().copied().unwrap_or_default();

    (user_agent.to_owned(), parse_options(options))
}

/// Substring search for `noindex` / `nofollow`, ignoring ASCII case.
pub(crate) fn parse_options(options: &str) -> DirectiveRecord {
    let mut record = DirectiveRecord::default();
    for m in DIRECTIVES.find_overlapping_iter(options) {
        match m.pattern().as_usize() {
            NOINDEX => record.noindex = true,
            NOFOLLOW => record.nofollow = true,
            _ => {}
        }
    }
    record
}

/// Build the user-agent → directives table. Later headers overwrite earlier
/// ones for the same token.
pub(crate) fn parse_headers(headers: &RawHeaders) -> IndexMap<String, DirectiveRecord> {
    let mut table = IndexMap::new();
    for header in robots_headers(headers) {
        let (user_agent, record) = parse_directive(&header.content());
        log::debug!(
            "robots header `{}` -> user-agent `{}`: {:?}",
            header.name,
            user_agent,
            record
        );
        table.insert(user_agent, record);
    }
    table
}
