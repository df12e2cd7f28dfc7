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

use clap::{Args, Parser, Subcommand};

use crate::sections::SectionKind;

/// Compliance site content tool
///
/// Reads site content the way the pages do: remote rows when the content
/// store has them, bundled content otherwise.
///
/// Configure the store with CONTENT_STORE_URL and CONTENT_STORE_KEY.
#[derive(Parser, Debug)]
#[clap(name = "compliance-site")]
pub struct Opt {
    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Print what a section would render, as JSON.
    Preview(Preview),

    /// List every icon key and its CSS class.
    Icons,
}

#[derive(Args, Debug, Clone)]
pub struct Preview {
    /// One of: hero-stats, carousel, pricing, resources, faq.
    pub section: SectionKind,

    /// Only print the request that would be sent.
    #[clap(long = "request-only")]
    pub request_only: bool,
}
