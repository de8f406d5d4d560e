// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Geoadmin: an administrative client for points, lines and polygons

fn main() -> anyhow::Result<()> {
    geoadmin::run()
}
