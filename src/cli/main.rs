use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

use exiftool_mapper::config;
use exiftool_mapper::mapper::{MappedFields, Mapper, RawData};

#[derive(Parser, Debug)]
#[command(
    name = "exiftool-mapper",
    version,
    about = "Normalize `exiftool -j` output into canonical metadata fields"
)]
struct Cli {
    /// JSON files written by `exiftool -j` (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    paths: Vec<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// GPS values are degree/minute/second strings (exiftool run without `-n`)
    #[arg(long)]
    dms: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// One printed entry: the mapped fields, or why the object could not be mapped.
#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Mapped {
        #[serde(rename = "SourceFile", skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        #[serde(flatten)]
        fields: MappedFields,
    },
    Failed {
        #[serde(rename = "SourceFile", skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        error: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    // Load config, CLI flags win
    let mut config = config::Config::load(cli.config.as_deref())?;
    if cli.dms {
        config.mapper.numeric = false;
    }
    if cli.pretty {
        config.output.pretty = true;
    }

    let mapper = config.build_mapper();
    log::debug!(
        "Mapper: {} ({:?} GPS)",
        mapper.name(),
        mapper.coordinate_format()
    );

    let objects = read_objects(&cli.paths)?;
    let total = objects.len();
    let mut outputs = Vec::with_capacity(total);

    for raw in &objects {
        let source = if config.output.include_source {
            raw.get("SourceFile")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        } else {
            None
        };

        match mapper.map_raw_data(raw) {
            Ok(fields) => {
                log::debug!(
                    "{}: {} field(s)",
                    source.as_deref().unwrap_or("<input>"),
                    fields.len()
                );
                outputs.push(Output::Mapped { source, fields });
            }
            Err(e) => {
                log::error!("{}: {e}", source.as_deref().unwrap_or("<input>"));
                outputs.push(Output::Failed {
                    source,
                    error: e.to_string(),
                });
            }
        }
    }

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&outputs)?
    } else {
        serde_json::to_string(&outputs)?
    };
    println!("{json}");

    // Summary
    let failed = outputs
        .iter()
        .filter(|o| matches!(o, Output::Failed { .. }))
        .count();
    log::info!(
        "Done: {} mapped, {failed} failed out of {total} object(s)",
        total - failed
    );

    Ok(())
}

/// Read exiftool JSON (an array of objects, or a single object) from each path, or stdin.
fn read_objects(paths: &[PathBuf]) -> Result<Vec<RawData>> {
    let mut sources = Vec::new();
    if paths.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        sources.push(("<stdin>".to_string(), buf));
    } else {
        for path in paths {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            sources.push((path.display().to_string(), contents));
        }
    }

    let mut objects = Vec::new();
    for (name, contents) in sources {
        let value: serde_json::Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {name} as JSON"))?;
        match value {
            serde_json::Value::Array(items) => {
                for item in items {
                    match item {
                        serde_json::Value::Object(obj) => objects.push(obj),
                        other => log::warn!("Skipping non-object entry in {name}: {other}"),
                    }
                }
            }
            serde_json::Value::Object(obj) => objects.push(obj),
            other => log::warn!("Skipping {name}: expected an object or array, got {other}"),
        }
    }

    Ok(objects)
}
