//! In-memory object graph of a parsed dat file.
//!
//! These structs mirror the records the dat codec produces. Field widths follow
//! the on-disk format (`i16` hit points, `u8` command types, ...) so an edit that
//! does not fit the format is visible at the type level instead of at save time.
//!
//! Fixed-arity tuples are arrays. Unused slots hold the `EMPTY` sentinel of
//! their record type (resource type `-1`, amount `0`).

use crate::error::DatError;
use crate::ids::{ArmorClass, CivId, EffectId, ResourceId, TechId, UnitClass, UnitId};
use serde::{Deserialize, Serialize};

/// Aggregate root: every civilization, technology and effect in the game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatFile {
    /// Format version string as read from the file header.
    #[serde(default)]
    pub version: String,
    pub civs: Vec<Civ>,
    pub techs: Vec<Tech>,
    pub effects: Vec<Effect>,
}

/// One civilization and its private copy of every unit slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Civ {
    pub name: String,
    /// Starting resource values indexed by resource type id.
    pub resources: Vec<f32>,
    /// One slot per global unit id. `None` marks an unused slot.
    pub units: Vec<Option<Unit>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i16,
    /// Unit this record was based on; duplicates point at themselves.
    pub base_id: i16,
    pub copy_id: i16,
    pub name: String,
    pub class: i16,
    pub hit_points: i16,
    pub speed: f32,
    pub standing_graphic: (i16, i16),
    pub dying_graphic: i16,
    pub undead_graphic: i16,
    #[serde(default)]
    pub damage_graphics: Vec<DamageGraphic>,
    pub resource_storages: [ResourceStorage; 3],
    /// Combat block (type 50 and up). Absent on flags, trees, and decoration.
    #[serde(default)]
    pub combat: Option<Type50>,
    /// Present only on trainable units and buildable buildings.
    #[serde(default)]
    pub creatable: Option<Creatable>,
    #[serde(default)]
    pub building: Option<Building>,
}

impl Unit {
    pub fn unit_class(&self) -> UnitClass {
        UnitClass(self.class)
    }

    pub fn unit_id(&self) -> UnitId {
        UnitId(self.id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageGraphic {
    pub graphic_id: i16,
    pub damage_percent: i16,
    pub apply_mode: u8,
}

/// Attack and armor block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Type50 {
    pub attacks: Vec<AttackOrArmor>,
    pub armours: Vec<AttackOrArmor>,
    pub displayed_attack: i16,
    pub displayed_melee_armour: i16,
}

/// One damage-class entry. The engine sums every entry of the same class, so a
/// class should appear at most once per list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOrArmor {
    pub class: i16,
    pub amount: i16,
}

impl AttackOrArmor {
    pub fn new(class: ArmorClass, amount: i16) -> Self {
        Self {
            class: class.0,
            amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creatable {
    /// Unit costs carry at most two resources plus population headroom;
    /// buildings may use all three slots.
    pub resource_costs: [ResourceCost; 3],
    pub train_time: i16,
    pub train_location_id: i16,
    pub button_id: u8,
    /// Bit flags: 2 = cannot be converted, 4 = regenerates, ...
    pub hero_mode: u8,
    pub garrison_graphic: i32,
    pub displayed_pierce_armor: i16,
    pub max_charge: f32,
    pub recharge_rate: f32,
    pub charge_event: i16,
    pub charge_type: i16,
}

/// Building-only graphics block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub construction_graphic_id: i16,
    pub snow_graphic_id: i16,
    pub destruction_graphic_id: i16,
    pub destruction_rubble_graphic_id: i16,
    pub researching_graphic: i16,
    pub research_completed_graphic: i16,
}

/// Training or construction cost entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCost {
    #[serde(rename = "type")]
    pub resource: i16,
    pub amount: i16,
    /// 1 = deducted when training starts, 0 = only required to be available.
    pub flag: i16,
}

impl ResourceCost {
    pub const EMPTY: ResourceCost = ResourceCost {
        resource: -1,
        amount: 0,
        flag: 0,
    };

    /// A cost that is paid when training starts.
    pub const fn paid(resource: ResourceId, amount: i16) -> Self {
        Self {
            resource: resource.0,
            amount,
            flag: 1,
        }
    }

    /// A cost that must be available but is not deducted.
    pub const fn required(resource: ResourceId, amount: i16) -> Self {
        Self {
            resource: resource.0,
            amount,
            flag: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resource < 0
    }
}

impl Default for ResourceCost {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Resource granted or consumed by owning a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceStorage {
    #[serde(rename = "type")]
    pub resource: i16,
    pub amount: f32,
    /// Storage mode bits, see [`crate::constants::storage_flags`].
    pub flag: u8,
}

impl ResourceStorage {
    pub const EMPTY: ResourceStorage = ResourceStorage {
        resource: -1,
        amount: 0.0,
        flag: 0,
    };

    pub const fn new(resource: ResourceId, amount: f32, flag: u8) -> Self {
        Self {
            resource: resource.0,
            amount,
            flag,
        }
    }
}

impl Default for ResourceStorage {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Research cost entry. Same layout as [`ResourceCost`] with a byte-wide flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResourceCost {
    #[serde(rename = "type")]
    pub resource: i16,
    pub amount: i16,
    pub flag: u8,
}

impl ResearchResourceCost {
    pub const EMPTY: ResearchResourceCost = ResearchResourceCost {
        resource: -1,
        amount: 0,
        flag: 0,
    };

    pub const fn paid(resource: ResourceId, amount: i16) -> Self {
        Self {
            resource: resource.0,
            amount,
            flag: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resource < 0
    }
}

impl Default for ResearchResourceCost {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tech {
    pub name: String,
    /// Prerequisite tech ids; unused slots hold [`Tech::NO_TECH`].
    pub required_techs: [i16; 6],
    pub resource_costs: [ResearchResourceCost; 3],
    /// How many of `required_techs` must be researched (K of N).
    pub required_tech_count: i16,
    /// Civ restriction, -1 for every civ.
    pub civ: i16,
    pub full_tech_mode: i16,
    /// Building unit id the tech is researched at, -1 for none.
    pub research_location: i16,
    pub language_dll_name: i32,
    pub language_dll_description: i32,
    pub research_time: i16,
    /// Effect applied on completion, -1 for none.
    pub effect_id: i16,
    #[serde(rename = "type")]
    pub tech_type: i16,
    pub icon_id: i16,
    pub button_id: u8,
    pub language_dll_help: i32,
    pub language_dll_tech_tree: i32,
    #[serde(default)]
    pub repeatable: u8,
}

impl Tech {
    pub const NO_TECH: i16 = -1;

    pub fn effect(&self) -> Option<EffectId> {
        (self.effect_id >= 0).then_some(EffectId(self.effect_id))
    }

    /// Prerequisites that are actually set, in slot order.
    pub fn prerequisites(&self) -> impl Iterator<Item = TechId> + '_ {
        self.required_techs
            .iter()
            .filter(|&&id| id != Self::NO_TECH)
            .map(|&id| TechId(id))
    }
}

impl Default for Tech {
    fn default() -> Self {
        Self {
            name: String::new(),
            required_techs: [Self::NO_TECH; 6],
            resource_costs: [ResearchResourceCost::EMPTY; 3],
            required_tech_count: 0,
            civ: -1,
            full_tech_mode: 0,
            research_location: -1,
            language_dll_name: 0,
            language_dll_description: 0,
            research_time: 0,
            effect_id: -1,
            tech_type: 0,
            icon_id: -1,
            button_id: 0,
            language_dll_help: 0,
            language_dll_tech_tree: 0,
            repeatable: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub name: String,
    pub effect_commands: Vec<EffectCommand>,
}

/// One raw effect command. `type_` selects how `a..d` are read; decode it
/// with `aoe2mod_core::effects::CommandKind` rather than inspecting codes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectCommand {
    #[serde(rename = "type")]
    pub type_: u8,
    pub a: i16,
    pub b: i16,
    pub c: i16,
    pub d: f32,
}

impl EffectCommand {
    pub const fn new(type_: u8, a: i16, b: i16, c: i16, d: f32) -> Self {
        Self { type_, a, b, c, d }
    }
}

fn new_index<T>(kind: &'static str, items: &[T]) -> Result<i16, DatError> {
    i16::try_from(items.len()).map_err(|_| DatError::IdSpaceExhausted {
        kind,
        len: items.len(),
    })
}

impl DatFile {
    pub fn civ(&self, id: CivId) -> Result<&Civ, DatError> {
        self.civs.get(id.index()).ok_or(DatError::UnknownCiv(id))
    }

    pub fn civ_mut(&mut self, id: CivId) -> Result<&mut Civ, DatError> {
        self.civs.get_mut(id.index()).ok_or(DatError::UnknownCiv(id))
    }

    pub fn tech(&self, id: TechId) -> Result<&Tech, DatError> {
        id.index()
            .and_then(|i| self.techs.get(i))
            .ok_or(DatError::UnknownTech(id))
    }

    pub fn tech_mut(&mut self, id: TechId) -> Result<&mut Tech, DatError> {
        id.index()
            .and_then(|i| self.techs.get_mut(i))
            .ok_or(DatError::UnknownTech(id))
    }

    pub fn effect(&self, id: EffectId) -> Result<&Effect, DatError> {
        id.index()
            .and_then(|i| self.effects.get(i))
            .ok_or(DatError::UnknownEffect(id))
    }

    pub fn effect_mut(&mut self, id: EffectId) -> Result<&mut Effect, DatError> {
        id.index()
            .and_then(|i| self.effects.get_mut(i))
            .ok_or(DatError::UnknownEffect(id))
    }

    /// A civ's copy of a unit. Fails if the civ or the slot is missing.
    pub fn unit(&self, civ: CivId, unit: UnitId) -> Result<&Unit, DatError> {
        self.civ(civ)?
            .unit(unit)
            .ok_or(DatError::MissingUnit { civ, unit })
    }

    pub fn unit_mut(&mut self, civ: CivId, unit: UnitId) -> Result<&mut Unit, DatError> {
        self.civ_mut(civ)?
            .unit_mut(unit)
            .ok_or(DatError::MissingUnit { civ, unit })
    }

    /// Append a technology, returning its new trailing id.
    pub fn push_tech(&mut self, tech: Tech) -> Result<TechId, DatError> {
        let id = new_index("techs", &self.techs)?;
        self.techs.push(tech);
        Ok(TechId(id))
    }

    /// Append an effect, returning its new trailing id.
    pub fn push_effect(&mut self, effect: Effect) -> Result<EffectId, DatError> {
        let id = new_index("effects", &self.effects)?;
        self.effects.push(effect);
        Ok(EffectId(id))
    }

    pub fn civ_ids(&self) -> impl Iterator<Item = CivId> + use<> {
        (0..self.civs.len().min(u8::MAX as usize + 1)).map(|i| CivId(i as u8))
    }
}

impl Civ {
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        id.index()
            .and_then(|i| self.units.get(i))
            .and_then(Option::as_ref)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        id.index()
            .and_then(|i| self.units.get_mut(i))
            .and_then(Option::as_mut)
    }

    /// Append a unit slot, returning the new trailing id. The caller owns
    /// rewriting the unit's own id fields.
    pub fn push_unit(&mut self, unit: Option<Unit>) -> Result<UnitId, DatError> {
        let id = new_index("units", &self.units)?;
        self.units.push(unit);
        Ok(UnitId(id))
    }

    /// Set a starting resource, growing the table if the id is past its end.
    pub fn set_resource(&mut self, resource: ResourceId, value: f32) {
        let Some(index) = resource.index() else {
            return;
        };
        if self.resources.len() <= index {
            self.resources.resize(index + 1, 0.0);
        }
        self.resources[index] = value;
    }
}
