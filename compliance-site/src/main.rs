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

//! Command-line preview of the site's content layer.

use anyhow::Context;
use clap::Parser;
use compliance_site::cli_args::{Mode, Opt, Preview};
use compliance_site::config::Config;
use compliance_site::icons::Icon;
use compliance_site::query::QueryAdapter;
use compliance_site::sections::{self, OwnedDisplay, ResourceCard, SectionKind};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Rendered<T> {
    section: &'static str,
    #[serde(flatten)]
    display: OwnedDisplay<T>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode preview")?;
    println!("{json}");
    Ok(())
}

async fn preview(adapter: &QueryAdapter, args: Preview) -> anyhow::Result<()> {
    let kind = args.section;
    if args.request_only {
        println!("{}", kind.request());
        return Ok(());
    }
    let section = kind.name();
    match kind {
        SectionKind::HeroStats => {
            let display = sections::hero_stats(adapter).settled_display().await;
            print_json(&Rendered { section, display })
        }
        SectionKind::Carousel => {
            let display = sections::carousel_texts(adapter).settled_display().await;
            print_json(&Rendered { section, display })
        }
        SectionKind::Pricing => {
            let display = sections::pricing_plans(adapter).settled_display().await;
            print_json(&Rendered { section, display })
        }
        SectionKind::Resources => {
            let rows = sections::resources(adapter).settled_display().await;
            let display = OwnedDisplay {
                source: rows.source,
                items: rows.items.iter().map(ResourceCard::from).collect::<Vec<_>>(),
            };
            print_json(&Rendered { section, display })
        }
        SectionKind::Faq => {
            let display = sections::faq_items(adapter).settled_display().await;
            print_json(&Rendered { section, display })
        }
    }
}

fn list_icons() {
    for icon in Icon::ALL {
        let marker = if icon == Icon::DEFAULT { " (default)" } else { "" };
        println!("{:<14} {}{marker}", icon.name(), icon.css_class());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::parse();

    match opt.mode {
        Mode::Preview(args) => {
            let config = Config::from_env().map_err(anyhow::Error::msg)?;
            let adapter = QueryAdapter::new(config.build_store());
            preview(&adapter, args).await?;
        }
        Mode::Icons => list_icons(),
    }

    Ok(())
}
