//! Subcommand implementations

use anyhow::{Context, Result};
use netfacts_core::{decode, Facts, ReplyKind, RouterFacts};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{error, info};

use crate::config::Config;

/// Read a reply from `file`, or from stdin when no file is given
pub fn read_reply(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reply from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read reply from stdin")?;
            Ok(text)
        }
    }
}

/// Decode a single reply
pub fn decode_one(kind: ReplyKind, text: &str) -> Result<Facts> {
    let facts = decode(kind, text)?;
    info!(%kind, "Decoded reply");
    Ok(facts)
}

/// Result of decoding every configured capture
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per router, in order of first appearance
    pub routers: Vec<RouterFacts>,
    /// Captures that could not be read or decoded
    pub failures: usize,
}

/// Decode all `[[capture]]` entries, grouping facts by router
pub fn batch(config: &Config, config_path: &Path) -> BatchReport {
    let mut report = BatchReport::default();

    for capture in &config.captures {
        let path = config.capture_path(config_path, capture);
        let facts = read_reply(Some(&path)).and_then(|text| decode_one(capture.kind, &text));

        match facts {
            Ok(facts) => {
                let position = report
                    .routers
                    .iter()
                    .position(|r| r.router == capture.router);
                let router = match position {
                    Some(idx) => &mut report.routers[idx],
                    None => {
                        report.routers.push(RouterFacts::new(capture.router.clone()));
                        let last = report.routers.len() - 1;
                        &mut report.routers[last]
                    }
                };
                router.absorb(facts);
            }
            Err(e) => {
                error!(
                    router = %capture.router,
                    kind = %capture.kind,
                    path = %path.display(),
                    "Skipping capture: {:#}",
                    e
                );
                report.failures += 1;
            }
        }
    }

    info!(
        routers = report.routers.len(),
        failures = report.failures,
        "Batch complete"
    );
    report
}

/// Table of supported reply kinds
pub fn kinds_table() -> String {
    ReplyKind::ALL
        .iter()
        .map(|kind| format!("{:<24}{}\n", kind.as_str(), kind.rpc()))
        .collect()
}

/// Serialize a value as JSON, pretty or compact
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
