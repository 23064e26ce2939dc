//! Per-user-agent `X-Robots-Tag` response header evaluation.
//!
//! ```
//! use robots_headers::{RawHeaders, RobotsHeaderTable};
//!
//! let headers = RawHeaders::from([("X-Robots-Tag", "googlebot: noindex")]);
//! let robots = RobotsHeaderTable::create(&headers);
//!
//! assert!(!robots.may_index("googlebot"));
//! assert!(robots.may_index("bingbot"));
//! assert!(robots.may_follow("googlebot"));
//! ```
mod config;
mod error;
mod fetch;
mod header_prefilter;
mod parser;
mod robots_header_table;
mod types;

pub use config::FetchConfig;
pub use error::{Error, Result};
pub use fetch::{HeaderFetcher, SourceFetcher};
pub use robots_header_table::RobotsHeaderTable;
pub use types::*;
