// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Command line arguments

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Administrative client for points, lines and polygons stored on a
/// geometry backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// config file (defaults to <config dir>/geoadmin/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// backend endpoint, overrides the config file
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// user id for ownership checks, overrides the config file
    #[arg(long)]
    pub user: Option<String>,

    /// initial zoom level, overrides the config file
    #[arg(long)]
    pub zoom: Option<u8>,

    /// start without loading stored geometries
    #[arg(long, default_value_t = false)]
    pub no_load: bool,
}

impl CliArgs {
    /// Layer the flags over values read from the config file
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(user) = &self.user {
            config.current_user = user.clone();
        }
        if let Some(zoom) = self.zoom {
            config.zoom = Some(zoom);
        }
    }
}
