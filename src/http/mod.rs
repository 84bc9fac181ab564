//! HTTP protocol layer module
//!
//! Response builders and query-string helpers shared by the fragment handler
//! and the router, decoupled from the fragment logic itself.

pub mod query;
pub mod response;

pub use query::query_param;
pub use response::{build_failure_response, build_html_response, build_not_mounted_response};
