use std::{fs::read_to_string, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use simple_logger::SimpleLogger;

use dungeon::{Map, PartialConfig};

#[derive(Debug, Parser)]
struct Args {
    /// Configuration file for the dungeon
    #[clap(short)]
    config: Option<PathBuf>,
    /// Overrides for the configuration file
    #[clap(flatten)]
    overrides: PartialConfig,
    /// Do not print the byte grid
    #[clap(long)]
    no_bytes: bool,
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let Args {
        config,
        overrides,
        no_bytes,
    } = Args::parse();
    let config = config
        .map(|path| {
            read_to_string(path)
                .context("Cannot read config file")
                .and_then(|s| toml::from_str::<PartialConfig>(&s).context("Cannot parse config file"))
        })
        .transpose()
        .context("While loading configs")?
        .unwrap_or_default()
        .merge(overrides)
        .or_defaults();

    println!("Map seed: {}", config.seed);
    println!("Number of rooms: {}", config.rooms_count);

    let map = Map::new(&config).context("While generating the dungeon")?;
    let size = map.size();

    println!("Map size: {size}");
    println!();
    println!("Generated map (ASCII):\n{map}");
    if !no_bytes {
        println!("Generated map (bytes):");
        for row in map.as_bytes().chunks(usize::from(size.x)) {
            let line: String = row.iter().map(|b| b.to_string()).collect();
            println!("{line}");
        }
    }
    Ok(())
}
