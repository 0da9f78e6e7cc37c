//! Admatch server library crate (used by the `admatch` binary and
//! integration tests).

pub mod gateway;
