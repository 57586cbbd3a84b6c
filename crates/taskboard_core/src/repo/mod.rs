//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the local key-value storage contract.
//! - Encode/decode the task snapshot stored in it.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`Decode`, `Unavailable`) in
//!   addition to DB transport errors.

pub mod kv_repo;
pub mod snapshot;
