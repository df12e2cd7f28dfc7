/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Content layer of the compliance marketing site.
//!
//! Sections read their rows from the remote content store through
//! [`query::QueryAdapter`] and fall back to the bundled [`catalog`] whenever
//! remote content is loading, failed or empty. Lead forms and the gap checker
//! write back to the same store. The binary entry point (`main.rs`) is a thin
//! preview tool over this library.

pub mod catalog;
pub mod cli_args;
pub mod config;
pub mod counter;
pub mod fallback;
pub mod forms;
pub mod gap_checker;
pub mod icons;
pub mod query;
pub mod sections;
