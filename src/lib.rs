//! A tiny driver for demonstrating a pre-built `spacegrep` binary.
//!
//! This crate provides the small set of building blocks behind the
//! `run-examples` binary: it discovers `<base>.pat`/`<base>.doc` pairs in a
//! directory, and for each pair echoes the matcher command line and then runs
//! the matcher on it, stopping at the first failure. An optional report mode
//! captures each invocation's output and aggregates it into a JSON or HTML
//! report instead of streaming it through. It is intentionally small and easy
//! to read; the matching engine itself is an external executable and is
//! treated as a black box.
//!
//! The main entry point is [`Runner`], configured through [`config::Config`].
//! See the bundled `demos/` directory for a pair of ready-made inputs.

pub mod config;
pub mod pairs;
pub mod report;
mod matcher;
mod runner;

/// Just a convenient re-export of the sequential demo driver.
///
/// See [`Runner`] for the high-level API.
pub use runner::Runner;
