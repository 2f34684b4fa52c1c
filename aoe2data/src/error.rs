//! Errors raised when a lookup or codec call does not match the loaded dat.

use crate::ids::{CivId, EffectId, TechId, UnitId};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Civilization {0} does not exist")]
    UnknownCiv(CivId),
    #[error("Technology {0} does not exist")]
    UnknownTech(TechId),
    #[error("Effect {0} does not exist")]
    UnknownEffect(EffectId),
    #[error("Civilization {civ} has no unit in slot {unit}")]
    MissingUnit { civ: CivId, unit: UnitId },
    #[error("Collection of {kind} is full ({len} entries), no id left for a new record")]
    IdSpaceExhausted { kind: &'static str, len: usize },
}

impl DatError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DatError::Io {
            path: path.into(),
            source,
        }
    }
}
