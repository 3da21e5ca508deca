//! Echo replay harness.
//!
//! Usage: `echo-replay <script.json>`
//!
//! Prints one JSON object per line on stdout; logs go to stderr.

use anyhow::Context;
use echo_core::RuleConfig;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod runner;
mod script;

use script::Script;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: echo-replay <script.json>")?;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read script {path}"))?;
    let script = Script::from_json(&text)?;

    // Rule overrides from env
    let rules = match std::env::var("ECHO_RULES") {
        Ok(rules_path) => {
            let json = std::fs::read_to_string(&rules_path)
                .with_context(|| format!("failed to read rules {rules_path}"))?;
            Some(RuleConfig::from_json(&json)?)
        }
        Err(_) => None,
    };

    info!(%path, steps = script.steps.len(), "replaying script");

    let lines = runner::run(&script, rules)?;

    let mut out = io::stdout().lock();
    for line in &lines {
        serde_json::to_writer(&mut out, line)?;
        writeln!(out)?;
    }

    Ok(())
}
