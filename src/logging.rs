// SPDX-License-Identifier: MIT
//
// Diagnostics go to stderr so stdout carries only the document.
//
//   RUST_LOG=debug                 every structural edit
//   RUST_LOG=runed_core=trace      coordinate translation too
//
// Without RUST_LOG only warnings are shown.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_line_number(true);
    tracing_subscriber::registry().with(filter).with(layer).init();
}
