//! Request-scoped models passed between the tool surface and the providers.
//!
//! Two wire dialects exist: chat-completion style (ordered role/content
//! messages) and generation style (an ordered content sequence). Tool
//! parameters deserialize into these structs once per call; the providers
//! convert them to the wire format at the request boundary. Nothing here
//! outlives a single invocation.
pub mod content;
pub mod message;
pub mod role;
