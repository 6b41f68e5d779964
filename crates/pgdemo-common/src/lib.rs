//! # pgdemo-common
//!
//! Configuration and error handling shared by the pgdemo crates.
//! No I/O beyond reading the environment.

pub mod config;
pub mod error;
