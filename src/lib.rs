// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Geoadmin: an administrative client for points, lines and polygons
//! stored on a geometry backend

use anyhow::Context;
use clap::Parser;

mod cli;
pub mod components;
pub mod config;
pub mod console;
pub mod editing;
pub mod map;
pub mod model;
pub mod panel;
pub mod persistence;
pub mod settings;
pub mod theme;

pub use cli::CliArgs;
pub use config::Config;
pub use panel::AdminPanel;

use map::HeadlessMap;
use persistence::HttpTransport;

/// Entry point for the geoadmin console
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    // Logs go to stderr so they do not mix with console output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("geoadmin=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let args = CliArgs::parse();
    let mut config = Config::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;
    args.apply(&mut config);
    config.validate()?;

    tracing::info!("Signed in as {} against {}", config.current_user, config.base_url);

    let map = HeadlessMap::new(config.center(), config.zoom());
    let mut panel = AdminPanel::new(map, config.current_user, config.base_url);
    let mut transport = HttpTransport::new();

    if !args.no_load {
        panel.load();
        panel.flush(&mut transport);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    console::run_session(&mut panel, &mut transport, stdin.lock(), stdout.lock())
        .context("console session failed")?;
    Ok(())
}
