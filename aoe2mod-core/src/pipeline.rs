//! Script selection and sequencing.

use std::fmt;

use aoe2data::DatFile;
use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::scripts;

/// A bundled mod script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModScript {
    AgeDiplomacy,
    UnitExamples,
    TechExamples,
    #[serde(rename = "custom_modifications", alias = "custom")]
    Custom,
}

impl ModScript {
    pub const ALL: [ModScript; 4] = [
        ModScript::AgeDiplomacy,
        ModScript::UnitExamples,
        ModScript::TechExamples,
        ModScript::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModScript::AgeDiplomacy => scripts::age_diplomacy::NAME,
            ModScript::UnitExamples => scripts::unit_examples::NAME,
            ModScript::TechExamples => scripts::tech_examples::NAME,
            ModScript::Custom => scripts::custom::NAME,
        }
    }

    pub fn run(self, dat: &mut DatFile) -> Result<(), EditError> {
        match self {
            ModScript::AgeDiplomacy => scripts::run_age_diplomacy(dat),
            ModScript::UnitExamples => scripts::run_unit_examples(dat),
            ModScript::TechExamples => scripts::run_tech_examples(dat),
            ModScript::Custom => scripts::run_custom_modifications(dat),
        }
    }
}

impl fmt::Display for ModScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ModScript {
    type Err = String;

    /// Accepts the script name with `_` or `-` separators, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        let matched = ModScript::ALL.into_iter().find(|script| {
            script.name() == wanted || (wanted == "custom" && *script == ModScript::Custom)
        });
        matched.ok_or_else(|| {
            let names: Vec<&str> = ModScript::ALL.iter().map(|s| s.name()).collect();
            format!("Unknown mod script: {}. Use one of {}.", s, names.join(", "))
        })
    }
}

/// Run `scripts` in order. The first failure aborts the run and leaves `dat`
/// partially edited; callers must not save it.
pub fn run_scripts(dat: &mut DatFile, scripts: &[ModScript]) -> Result<(), EditError> {
    for script in scripts {
        log::info!("Applying {}", script);
        script.run(dat)?;
    }
    log::info!("Modifications completed");
    Ok(())
}
