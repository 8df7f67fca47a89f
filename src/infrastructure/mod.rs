//! Adapters behind the domain ports: the in-memory ledger, the HTTP
//! incentive client, and the in-process event stream.

pub mod in_memory;
pub mod incentive;
pub mod stream;
