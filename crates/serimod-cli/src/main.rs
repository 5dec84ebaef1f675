mod manifest;

use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::manifest::{Manifest, ManifestError};

/// Used when no manifest path is given.
const DEMO_MANIFEST: &str = include_str!("../demo/modules.json");

fn run() -> Result<String, ManifestError> {
    // 引数が無ければ同梱のデモ manifest を使う
    let manifest = match std::env::args().nth(1) {
        Some(path) => Manifest::from_path(path)?,
        None => Manifest::parse(DEMO_MANIFEST)?,
    };

    let built = manifest.build()?;
    let report = built.report(&manifest.queries);
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "failed to build serial modules");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
