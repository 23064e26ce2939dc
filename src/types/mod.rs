mod directive;
mod header_value;
mod raw_headers;

pub use directive::*;
pub use header_value::*;
pub use raw_headers::*;
