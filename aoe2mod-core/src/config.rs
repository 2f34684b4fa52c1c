use std::path::PathBuf;

use aoe2data::path::MOD_DAT_FILE_NAME;
use serde::{Deserialize, Serialize};

use crate::pipeline::ModScript;

/// Settings for one toolkit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Dat file to load.
    pub input: PathBuf,
    /// Where the modded dat is written. A data mod must name it
    /// `empires2_x2_p1.dat`.
    pub output: PathBuf,
    /// Scripts to apply, in order.
    pub scripts: Vec<ModScript>,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Cache directory. `None` uses the per-user cache directory.
    pub dir: Option<PathBuf>,
    /// Re-hash cached snapshots on every load instead of trusting them.
    pub strict: bool,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("datfiles/base_game.dat"),
            output: PathBuf::from("datfiles").join(MOD_DAT_FILE_NAME),
            scripts: vec![ModScript::TechExamples],
            cache: CacheConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            strict: false,
        }
    }
}
