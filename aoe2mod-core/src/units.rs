//! Unit stat editor.
//!
//! Each editor takes a [`UnitSelector`] and applies the same change to every
//! civ's copy. The `*_unit` functions are the per-copy primitives, for scripts
//! whose change depends on the unit being edited.
//!
//! Graphics are the exception: they are how civs differ visually, so
//! [`copy_graphics`] and [`copy_architecture`] edit a single civ.

use aoe2data::constants::unit_classes;
use aoe2data::{
    ArmorClass, AttackOrArmor, CivId, Creatable, DatFile, ResourceCost, ResourceStorage, Type50,
    Unit, UnitClass, UnitId,
};

use crate::civs::{for_each_unit, for_each_unit_in, CivScope, UnitSelector};
use crate::error::EditError;
use crate::saturate::{self, Saturated};

/// Building classes whose graphics make up a civ's architecture set.
pub const ARCHITECTURE_CLASSES: [UnitClass; 3] = [
    unit_classes::BUILDING,
    unit_classes::WALL,
    unit_classes::TOWER,
];

fn creatable_mut(civ: CivId, slot: UnitId, unit: &mut Unit) -> Result<&mut Creatable, EditError> {
    unit.creatable
        .as_mut()
        .ok_or(EditError::MissingCreatable { civ, unit: slot })
}

fn combat_mut(civ: CivId, slot: UnitId, unit: &mut Unit) -> Result<&mut Type50, EditError> {
    unit.combat
        .as_mut()
        .ok_or(EditError::MissingCombat { civ, unit: slot })
}

/// Which damage-class list an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageList {
    Attacks,
    Armours,
}

impl DamageList {
    fn of(self, combat: &mut Type50) -> &mut Vec<AttackOrArmor> {
        match self {
            DamageList::Attacks => &mut combat.attacks,
            DamageList::Armours => &mut combat.armours,
        }
    }
}

/// Add `amount` to the entry for `class`, appending a new entry only when the
/// list has none. A duplicate class entry would be summed by the engine.
pub fn add_damage_class(list: &mut Vec<AttackOrArmor>, class: ArmorClass, amount: i16) {
    let mut found = false;
    for entry in list.iter_mut().filter(|e| e.class == class.0) {
        entry.amount = saturate::add_i16(entry.amount, amount as i32).value;
        found = true;
    }
    if !found {
        list.push(AttackOrArmor::new(class, amount));
    }
}

/// Make sure `class` has an entry, appending `amount` if absent. Existing
/// entries are left alone.
///
/// Attribute-modifier effects only change classes a unit already has, so a
/// zero entry is what lets a later effect grant bonus damage.
pub fn ensure_damage_class(list: &mut Vec<AttackOrArmor>, class: ArmorClass, amount: i16) -> bool {
    if list.iter().any(|e| e.class == class.0) {
        return false;
    }
    list.push(AttackOrArmor::new(class, amount));
    true
}

/// Scale one copy's hit points, skipping negative (placeholder) values.
pub fn scale_unit_hit_points(unit: &mut Unit, factor: f64) -> Option<Saturated> {
    if unit.hit_points < 0 {
        log::debug!(
            "Unit ID {} ({}): HP not modified (original HP: {})",
            unit.id,
            unit.name,
            unit.hit_points
        );
        return None;
    }
    let original = unit.hit_points;
    let scaled = saturate::scale_i16(original, factor);
    unit.hit_points = scaled.value;
    if scaled.capped {
        log::debug!(
            "Unit ID {} ({}): HP {} -> {} (capped to {})",
            unit.id,
            unit.name,
            original,
            scaled.value,
            saturate::I16_MAX
        );
    } else {
        log::debug!(
            "Unit ID {} ({}): HP {} -> {}",
            unit.id,
            unit.name,
            original,
            scaled.value
        );
    }
    Some(scaled)
}

/// Scale one copy's train time.
///
/// Negative times mark units that are never trained and are left alone. A
/// positive time never scales below 1, since 0 means "instant".
pub fn scale_unit_train_time(
    civ: CivId,
    slot: UnitId,
    unit: &mut Unit,
    factor: f64,
) -> Result<Option<Saturated>, EditError> {
    let id = unit.id;
    let creatable = creatable_mut(civ, slot, unit)?;
    let original = creatable.train_time;
    if original < 0 {
        log::debug!(
            "Unit ID {}: Train time not modified (original Train Time: {})",
            id,
            original
        );
        return Ok(None);
    }
    let mut scaled = saturate::scale_i16(original, factor);
    if original > 0 && scaled.value < 1 {
        scaled.value = 1;
    }
    creatable.train_time = scaled.value;
    log::debug!(
        "Unit ID {}: Train time {} -> {}{}",
        id,
        original,
        scaled.value,
        if scaled.capped { " (capped)" } else { "" }
    );
    Ok(Some(scaled))
}

pub fn set_hit_points(dat: &mut DatFile, sel: UnitSelector<'_>, hp: i16) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |_, _, unit| {
        unit.hit_points = hp;
        Ok(())
    })
}

/// Scale hit points, saturating at 32767.
pub fn scale_hit_points(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    factor: f64,
) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |_, _, unit| {
        scale_unit_hit_points(unit, factor);
        Ok(())
    })
}

pub fn set_speed(dat: &mut DatFile, sel: UnitSelector<'_>, speed: f32) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |_, _, unit| {
        unit.speed = speed;
        Ok(())
    })
}

pub fn scale_speed(dat: &mut DatFile, sel: UnitSelector<'_>, factor: f32) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |_, _, unit| {
        unit.speed *= factor;
        Ok(())
    })
}

/// Add to an attack class in place, or append it if the unit has none.
pub fn add_attack(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    class: ArmorClass,
    amount: i16,
) -> Result<usize, EditError> {
    add_to_damage_list(dat, sel, DamageList::Attacks, class, amount)
}

/// Add to an armor class in place, or append it if the unit has none.
pub fn add_armor(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    class: ArmorClass,
    amount: i16,
) -> Result<usize, EditError> {
    add_to_damage_list(dat, sel, DamageList::Armours, class, amount)
}

fn add_to_damage_list(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    list: DamageList,
    class: ArmorClass,
    amount: i16,
) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        let combat = combat_mut(civ, slot, unit)?;
        add_damage_class(list.of(combat), class, amount);
        Ok(())
    })
}

/// Give every selected unit an entry for `class` if it lacks one.
/// Returns how many copies gained an entry.
pub fn ensure_class_entry(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    list: DamageList,
    class: ArmorClass,
    amount: i16,
) -> Result<usize, EditError> {
    let mut added = 0;
    for_each_unit(dat, sel, |civ, slot, unit| {
        let combat = combat_mut(civ, slot, unit)?;
        if ensure_damage_class(list.of(combat), class, amount) {
            added += 1;
        }
        Ok(())
    })?;
    Ok(added)
}

/// Drop every armor entry of `class`. With no armor of a class, a unit takes
/// no damage of that class at all.
pub fn remove_armor_class(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    class: ArmorClass,
) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        combat_mut(civ, slot, unit)?
            .armours
            .retain(|armor| armor.class != class.0);
        Ok(())
    })
}

/// Change the attack/armor values shown in the unit panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayedStats {
    pub attack: i16,
    pub melee_armor: i16,
    pub pierce_armor: i16,
}

/// Shift the displayed stats by `delta`. These are cosmetic and do not
/// follow the real attack/armor lists on their own.
pub fn add_displayed_stats(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    delta: DisplayedStats,
) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        if delta.attack != 0 || delta.melee_armor != 0 {
            let combat = combat_mut(civ, slot, unit)?;
            combat.displayed_attack = saturate::add_i16(combat.displayed_attack, delta.attack as i32).value;
            combat.displayed_melee_armour =
                saturate::add_i16(combat.displayed_melee_armour, delta.melee_armor as i32).value;
        }
        if delta.pierce_armor != 0 {
            let creatable = creatable_mut(civ, slot, unit)?;
            creatable.displayed_pierce_armor =
                saturate::add_i16(creatable.displayed_pierce_armor, delta.pierce_armor as i32).value;
        }
        Ok(())
    })
}

pub fn set_displayed_pierce_armor(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    value: i16,
) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        creatable_mut(civ, slot, unit)?.displayed_pierce_armor = value;
        Ok(())
    })
}

/// Replace the training cost. Build the tuple with [`crate::costs`].
pub fn set_train_cost(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    costs: [ResourceCost; 3],
) -> Result<usize, EditError> {
    set_train_cost_in(dat, CivScope::All, sel, costs)
}

pub fn set_train_cost_in(
    dat: &mut DatFile,
    scope: CivScope,
    sel: UnitSelector<'_>,
    costs: [ResourceCost; 3],
) -> Result<usize, EditError> {
    for_each_unit_in(dat, scope, sel, |civ, slot, unit| {
        creatable_mut(civ, slot, unit)?.resource_costs = costs;
        Ok(())
    })
}

pub fn set_train_time(dat: &mut DatFile, sel: UnitSelector<'_>, time: i16) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        creatable_mut(civ, slot, unit)?.train_time = time;
        Ok(())
    })
}

/// Scale train time, saturating at 32767. See [`scale_unit_train_time`].
pub fn scale_train_time(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    factor: f64,
) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        scale_unit_train_time(civ, slot, unit, factor).map(|_| ())
    })
}

/// Move where a unit is trained and which button it occupies there.
pub fn set_train_location(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    location: UnitId,
    button_id: u8,
) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        let creatable = creatable_mut(civ, slot, unit)?;
        creatable.train_location_id = location.0;
        creatable.button_id = button_id;
        Ok(())
    })
}

pub fn set_resource_storages(
    dat: &mut DatFile,
    sel: UnitSelector<'_>,
    storages: [ResourceStorage; 3],
) -> Result<usize, EditError> {
    set_resource_storages_in(dat, CivScope::All, sel, storages)
}

pub fn set_resource_storages_in(
    dat: &mut DatFile,
    scope: CivScope,
    sel: UnitSelector<'_>,
    storages: [ResourceStorage; 3],
) -> Result<usize, EditError> {
    for_each_unit_in(dat, scope, sel, |_, _, unit| {
        unit.resource_storages = storages;
        Ok(())
    })
}

/// Hero mode bit flags.
pub mod hero_flags {
    pub const NO_CONVERSION: u8 = 2;
    pub const REGENERATION: u8 = 4;
}

pub fn set_hero_mode(dat: &mut DatFile, sel: UnitSelector<'_>, flags: u8) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        creatable_mut(civ, slot, unit)?.hero_mode = flags;
        Ok(())
    })
}

/// Charge attack / projectile dodge parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    pub max_charge: f32,
    pub recharge_rate: f32,
    pub charge_event: i16,
    pub charge_type: i16,
}

pub fn set_charge(dat: &mut DatFile, sel: UnitSelector<'_>, charge: Charge) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        let creatable = creatable_mut(civ, slot, unit)?;
        creatable.max_charge = charge.max_charge;
        creatable.recharge_rate = charge.recharge_rate;
        creatable.charge_event = charge.charge_event;
        creatable.charge_type = charge.charge_type;
        Ok(())
    })
}

/// Multiply the existing charge capacity and recharge rate.
pub fn scale_charge(dat: &mut DatFile, sel: UnitSelector<'_>, factor: f32) -> Result<usize, EditError> {
    for_each_unit(dat, sel, |civ, slot, unit| {
        let creatable = creatable_mut(civ, slot, unit)?;
        creatable.max_charge *= factor;
        creatable.recharge_rate *= factor;
        Ok(())
    })
}

/// Copy one unit's graphics from civ `from` to civ `to`. Only `to` changes.
pub fn copy_graphics(dat: &mut DatFile, unit: UnitId, from: CivId, to: CivId) -> Result<(), EditError> {
    let source = dat.unit(from, unit)?.clone();
    let target = dat.unit_mut(to, unit)?;
    apply_graphics(&source, target);
    Ok(())
}

fn apply_graphics(source: &Unit, target: &mut Unit) {
    target.standing_graphic = source.standing_graphic;
    target.dying_graphic = source.dying_graphic;
    target.undead_graphic = source.undead_graphic;
    target.damage_graphics = source.damage_graphics.clone();
    if source.building.is_some() {
        target.building = source.building.clone();
    }
    if let (Some(src), Some(dst)) = (&source.creatable, &mut target.creatable) {
        dst.garrison_graphic = src.garrison_graphic;
    }
}

/// Give civ `to` the building graphics of civ `from`.
///
/// Returns how many buildings changed.
pub fn copy_architecture(dat: &mut DatFile, from: CivId, to: CivId) -> Result<usize, EditError> {
    let source = dat.civ(from)?.clone();
    let is_architecture = |_: UnitId, unit: &Unit| ARCHITECTURE_CLASSES.contains(&unit.unit_class());
    for_each_unit_in(
        dat,
        CivScope::Only(to),
        UnitSelector::Where(&is_architecture),
        |_, slot, unit| {
            if let Some(src) = source.unit(slot) {
                apply_graphics(src, unit);
            }
            Ok(())
        },
    )
}
