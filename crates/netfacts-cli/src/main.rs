//! Netfacts CLI - Decode captured Junos XML replies
//!
//! Reads replies saved from devices and prints the extracted facts as JSON.
//! Useful for checking how an unfamiliar device dialect decodes offline.

mod config;
mod run;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use netfacts_core::ReplyKind;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "netfacts")]
#[command(about = "Decode Junos XML command replies into JSON facts")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "netfacts.toml", global = true)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a single reply (from FILE, or stdin)
    Decode {
        /// Reply kind (version, interface-descriptions, interface-list, chassis-inventory, lacp)
        kind: ReplyKind,
        /// Reply file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Decode every [[capture]] listed in the config, grouped by router
    Batch,
    /// List supported reply kinds
    Kinds,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = config::load_config(&args.config)?;
    let configured_level = loaded.as_ref().map(|c| c.logging.level.as_str());

    // Initialize logging, keeping stdout for JSON
    let level = parse_level(args.log_level.as_deref().or(configured_level).unwrap_or("info"));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Netfacts v{}", env!("CARGO_PKG_VERSION"));
    config::log_source(&args.config, loaded.as_ref());
    let config = loaded.unwrap_or_default();

    let pretty = config.output.pretty && !args.compact;

    match args.command {
        Command::Decode { kind, file } => {
            let text = run::read_reply(file.as_deref())?;
            let facts = run::decode_one(kind, &text)?;
            println!("{}", run::render(&facts, pretty)?);
        }
        Command::Batch => {
            let report = run::batch(&config, &args.config);
            println!("{}", run::render(&report.routers, pretty)?);
            if report.failures > 0 {
                bail!("{} capture(s) failed to decode", report.failures);
            }
        }
        Command::Kinds => {
            print!("{}", run::kinds_table());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_args_decode_kind() {
        let args = Args::try_parse_from(["netfacts", "decode", "lacp", "reply.xml", "--compact"])
            .unwrap();
        assert!(args.compact);
        match args.command {
            Command::Decode { kind, file } => {
                assert_eq!(kind, ReplyKind::Lacp);
                assert_eq!(file, Some(PathBuf::from("reply.xml")));
            }
            other => panic!("unexpected command {:?}", other),
        }

        assert!(Args::try_parse_from(["netfacts", "decode", "ospf"]).is_err());
    }
}
