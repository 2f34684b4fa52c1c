use aoe2data::{CivId, DatError, TechId, UnitId};
use thiserror::Error;

use crate::costs::CostError;

/// Failure of an edit. Any of these aborts the run: the loaded dat does not
/// have the shape the edit was written against.
#[derive(Error, Debug)]
pub enum EditError {
    #[error(transparent)]
    Dat(#[from] DatError),
    #[error(transparent)]
    Cost(#[from] CostError),
    #[error("Unit {unit} of civilization {civ} is not creatable")]
    MissingCreatable { civ: CivId, unit: UnitId },
    #[error("Unit {unit} of civilization {civ} has no attack/armor block")]
    MissingCombat { civ: CivId, unit: UnitId },
    #[error("Tech {tech} has no effect")]
    NoEffect { tech: TechId },
    #[error("Tech {tech} has no free prerequisite slot")]
    PrerequisiteSlotsFull { tech: TechId },
    #[error("Unit slots diverged: civ {civ} assigned id {got} where civ 0 assigned {expected}")]
    CivDivergence {
        civ: CivId,
        expected: UnitId,
        got: UnitId,
    },
}
