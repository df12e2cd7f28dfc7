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

//! Remote reads and their progress.

mod adapter;
mod result;

pub use adapter::{QueryAdapter, RemoteQuery};
pub use result::{QueryError, QueryResult};
