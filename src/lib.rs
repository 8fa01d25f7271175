//! Typed harness for the Stellar Burgers ordering API.
//!
//! The [`client`] module is the harness proper: a JSON request builder, the
//! user and order wrappers, and the random fixture generator. The remaining
//! layers make up a contract stub of the service that the scenario suites
//! run against when no live endpoint is configured.

pub mod application;
pub mod client;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
