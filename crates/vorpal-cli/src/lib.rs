//! Vorpal CLI library.
//!
//! This crate provides the command implementations behind the `vorpal`
//! binary: rendering noise fields to PNG and summarizing distribution
//! samples.

pub mod commands;
pub mod config;
pub mod png;
