//! hostcheck - hosts-mapping resolution verification library
//!
//! Exposes the case generation and concurrent verification engine used by
//! the hostcheck binary: mapping-file parsing, negative-case synthesis,
//! resolver-under-test variants, and the bounded-concurrency verifier.

#![forbid(unsafe_code)]

pub mod cases;
pub mod cli;
pub mod config;
pub mod constants;
pub mod hosts;
pub mod models;
pub mod output;
pub mod resolver;
pub mod verify;
