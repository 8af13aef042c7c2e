//! Terminal presentation
//!
//! Report and bundle rendering with `console` styling. Everything here
//! writes to stdout; diagnostics go through `tracing` to stderr.

pub mod display;
