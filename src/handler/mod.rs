//! Request handler module
//!
//! The source fragment handler, the path resolution it relies on, and the
//! router that mounts it.

pub mod fragment;
pub mod resolve;
pub mod router;

// Re-export main entry points
pub use fragment::{FragmentError, HandlerOptions, SourceFragment, MESSAGE_PREFIX};
pub use router::{handle_request, Mount};
