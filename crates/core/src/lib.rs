//! Domain logic for the movies catalog that does not touch the network.
//!
//! Pagination rules, sort-token parsing, and the structured query DSL used
//! to talk to the document store live here so both the store layer and the
//! HTTP layer share one definition.

pub mod error;
pub mod query;
pub mod search;
pub mod sort;
