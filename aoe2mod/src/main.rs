use anyhow::{Context, Result};
use aoe2data::{DatCodec, JsonDatCodec};
use aoe2mod_core::{run_scripts, ModScript, ToolkitConfig};
use clap::Parser;
use std::path::PathBuf;

mod loader;

#[derive(Parser, Debug)]
#[command(author, version, about = "Apply mod scripts to an AoE2 dat file", long_about = None)]
struct Args {
    /// JSON file with run settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dat file to load
    #[arg(short, long, env = "AOE2MOD_INPUT")]
    input: Option<PathBuf>,

    /// Where to write the modded dat
    #[arg(short, long, env = "AOE2MOD_OUTPUT")]
    output: Option<PathBuf>,

    /// Game install to take the stock dat from when no input is given
    /// ("auto" searches the usual Steam locations)
    #[arg(long)]
    game_path: Option<String>,

    /// Scripts to apply, in order (age_diplomacy, unit_examples, tech_examples, custom)
    #[arg(short, long, value_delimiter = ',')]
    mods: Vec<ModScript>,

    /// Always parse the input, never read or write the snapshot cache
    #[arg(long)]
    no_cache: bool,

    /// Snapshot cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Re-hash cached snapshots before trusting them
    #[arg(long)]
    strict_cache: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> Result<ToolkitConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => ToolkitConfig::default(),
        };

        if let Some(input) = self.input {
            config.input = input;
        } else if let Some(game_path) = self.game_path {
            let game_path = if game_path == "auto" {
                aoe2data::path::detect_game_path()
                    .context("No AoE2 DE installation found, pass --game-path or --input")?
            } else {
                PathBuf::from(game_path)
            };
            config.input = aoe2data::path::default_dat_path(&game_path);
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if !self.mods.is_empty() {
            config.scripts = self.mods;
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
        if let Some(dir) = self.cache_dir {
            config.cache.dir = Some(dir);
        }
        if self.strict_cache {
            config.cache.strict = true;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let codec = JsonDatCodec { pretty: args.pretty };
    let config = args.into_config()?;
    log::debug!("{:?}", config);

    log::info!("Loading base data from {:?}...", config.input);
    let mut dat = loader::load_dat(&config, &codec)?;
    log::info!(
        "Base data loaded: {} civs, {} techs, {} effects",
        dat.civs.len(),
        dat.techs.len(),
        dat.effects.len()
    );

    log::info!("Applying modifications");
    run_scripts(&mut dat, &config.scripts)?;

    log::info!("Saving to {:?}...", config.output);
    codec
        .save(&dat, &config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    log::info!("Process completed!");

    Ok(())
}
