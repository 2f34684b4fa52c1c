//! # AoE2 Mod Core
//!
//! Record-level editing of an Age of Empires II dat file.
//!
//! The loaded [`DatFile`](aoe2data::DatFile) is owned by the driver and
//! passed by `&mut` to each editor. There is no undo: an error aborts the
//! run and the half-edited dat must not be saved.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  DatCodec   │────▶│   DatFile    │────▶│ run_scripts  │
//! │  (parse)    │     │  (in memory) │     │ (ModScript)  │
//! └─────────────┘     └──────────────┘     └──────┬───────┘
//!                                                 │
//!        ┌──────────────┬──────────────┬──────────▼───┬──────────────┐
//!        │ units        │ techs        │ effects      │ duplicate    │
//!        │ (stats)      │ (research)   │ (commands)   │ (new slots)  │
//!        └──────┬───────┴──────────────┴──────────────┴──────────────┘
//!               │
//!        ┌──────▼───────┐
//!        │ for_each_unit│  every civ's copy, same edit
//!        └──────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`UnitSelector`] | Which unit slots an edit applies to (id, class, predicate) |
//! | [`CivScope`] | Which civilizations an edit applies to |
//! | [`CommandKind`] | Effect command type decoded from its raw code |
//! | [`UnitDuplicate`] | Id of a duplicated unit and how many commands followed it |
//! | [`ModScript`] | A bundled script, selectable by name |
//! | [`EditError`] | Structural mismatch between an edit and the loaded dat |

pub mod civs;
pub mod config;
pub mod costs;
pub mod duplicate;
pub mod effects;
pub mod error;
pub mod pipeline;
pub mod requirements;
pub mod saturate;
pub mod scripts;
pub mod techs;
pub mod testing;
pub mod units;

pub use civs::{for_each_unit, for_each_unit_in, CivScope, UnitSelector};
pub use config::{CacheConfig, ToolkitConfig};
pub use costs::{CostError, CostKind};
pub use duplicate::{duplicate_unit, Retarget, UnitDuplicate};
pub use effects::{Command, CommandKind, CommandScope, CommandTarget, ScopeDigit};
pub use error::EditError;
pub use pipeline::{run_scripts, ModScript};
pub use requirements::is_researchable;
