use anyhow::{Context, Result};
use aoe2data::cache::{CacheValidationMode, SnapshotCache};
use aoe2data::{DatCodec, DatFile};
use aoe2mod_core::ToolkitConfig;

/// Load the input dat, going through the snapshot cache unless disabled.
pub fn load_dat(config: &ToolkitConfig, codec: &impl DatCodec) -> Result<DatFile> {
    let input = config.input.as_path();
    if !config.cache.enabled {
        log::info!("Parsing {:?} (cache disabled)", input);
        return codec
            .parse(input)
            .with_context(|| format!("Failed to parse {}", input.display()));
    }

    let mode = if config.cache.strict {
        CacheValidationMode::Strict
    } else {
        CacheValidationMode::Fast
    };
    let cache = match &config.cache.dir {
        Some(dir) => SnapshotCache::new(dir, mode),
        None => SnapshotCache::in_default_dir(mode),
    };
    log::debug!("Snapshot cache at {:?} ({:?})", cache.dir(), mode);

    cache
        .load_or_parse(input, |path| codec.parse(path))
        .with_context(|| format!("Failed to load {}", input.display()))
}
