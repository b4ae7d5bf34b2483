//! Domain core for the FAQ knowledge base.
//!
//! Holds the types shared by every other crate: ID/timestamp aliases,
//! the closed status enumerations, the lifecycle transition table, voter
//! identity, content payload types, and validation helpers. This crate
//! has no I/O; persistence lives in `faqbase-db`.

pub mod error;
pub mod lifecycle;
pub mod reference;
pub mod roles;
pub mod status;
pub mod submission;
pub mod tags;
pub mod types;
pub mod vote;
