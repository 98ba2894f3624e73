//! Domain layer for the company registry.
//!
//! Holds the [`company`] model and its validation rules, the [`store`]
//! capability the persistence layer implements, an in-process
//! [`memory`] store, and the [`service`] the HTTP layer talks to. Nothing in
//! here knows about HTTP or PostgreSQL.

pub mod company;
pub mod error;
pub mod memory;
pub mod service;
pub mod store;
pub mod types;
