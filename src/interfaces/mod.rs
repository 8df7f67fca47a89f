//! Inbound adapters: the JSON-lines event reader and the HTTP query surface.

pub mod http;
pub mod jsonl;
