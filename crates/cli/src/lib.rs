//! Library half of the `pollwatch` binary

pub mod config;
pub mod output;
