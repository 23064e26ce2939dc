use serde::{Deserialize, Serialize};

/// The user-agent token that applies to every crawler; also the default
/// agent for queries and the last fallback entry.
pub const ALL_USER_AGENTS: &str = "*";

/// Robots flags recorded for one user-agent token. An agent without a
/// record behaves like `DirectiveRecord::default()`: both flags off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveRecord {
    pub noindex: bool,
    pub nofollow: bool,
}

impl DirectiveRecord {
    pub fn may_index(&self) -> bool {
        !self.noindex
    }

    pub fn may_follow(&self) -> bool {
        !self.nofollow
    }
}
