//! Object graph of an Age of Empires II dat file.
//!
//! This crate holds the records a dat codec produces ([`DatFile`] and
//! friends), typed ids for them, a catalogue of well-known ids, the codec
//! boundary, and the snapshot cache that skips re-parsing unchanged files.
//! It performs no edits; see `aoe2mod-core` for that.

pub mod cache;
pub mod codec;
pub mod constants;
pub mod error;
pub mod ids;
pub mod model;
pub mod path;

pub use codec::{DatCodec, JsonDatCodec};
pub use error::DatError;
pub use ids::{ArmorClass, AttributeId, CivId, EffectId, ResourceId, TechId, UnitClass, UnitId};
pub use model::{
    AttackOrArmor, Building, Civ, Creatable, DamageGraphic, DatFile, Effect, EffectCommand,
    ResearchResourceCost, ResourceCost, ResourceStorage, Tech, Type50, Unit,
};
