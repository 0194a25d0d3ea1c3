// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tracing subscriber setup for the command-line tool.

use std::env;

use anyhow::Result;
use tracing::subscriber::set_global_default;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` if set and valid, otherwise `fallback`
fn create_env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if let Ok(rust_log) = env::var("RUST_LOG") {
            if !rust_log.is_empty() {
                eprintln!("Failed to parse RUST_LOG '{}': {}", rust_log, err);
            }
        }
        EnvFilter::try_new(fallback).unwrap_or_else(|err| {
            eprintln!("Invalid log level '{}': {}", fallback, err);
            EnvFilter::new("warn")
        })
    })
}

/// Install a global subscriber writing to stderr, so stdout carries only
/// answers
pub fn init_tracing(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(level))
        .with_writer(std::io::stderr)
        .finish();
    set_global_default(subscriber)?;
    Ok(())
}
