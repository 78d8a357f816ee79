// fieldsub/src/lib.rs
//! # fieldsub CLI
//!
//! Command-line front end for `fieldsub-core`: apply rule files to field values,
//! lint them, and convert them to and from flat records.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
