//! Worked examples of unit edits: speed, graphics, costs, storages, attacks,
//! armors, hero flags, charge attacks, hit points and train locations.

use std::collections::HashSet;

use aoe2data::constants::{
    armor_classes, attributes, civilizations, resources, storage_flags, techs, unit_classes, units,
};
use aoe2data::{DatFile, ResourceCost, ResourceId, ResourceStorage, Unit, UnitId};
use tracing::instrument;

use crate::civs::{set_civ_resource, CivScope, UnitSelector};
use crate::costs;
use crate::duplicate::{duplicate_unit, Retarget};
use crate::effects::{self, AttributeOp, CommandScope, CommandTarget};
use crate::error::EditError;
use crate::units::{self as unit_editor, hero_flags, Charge, DamageList, DisplayedStats};

pub const NAME: &str = "unit_examples";

/// Civ resource counting castles a player may still build.
pub const CASTLE_RESOURCE: ResourceId = ResourceId(120);

const KNIGHT_LINE: [UnitId; 4] = [units::KNIGHT, units::CAVALIER, units::PALADIN, units::SAVAR];

#[instrument(skip_all, name = "unit_examples")]
pub fn run_unit_examples(dat: &mut DatFile) -> Result<(), EditError> {
    change_movement_speed(dat)?;
    change_graphics(dat)?;
    change_unit_costs(dat)?;
    change_unit_storages(dat)?;
    change_attacks(dat)?;
    change_armors(dat)?;
    change_hero_mode(dat)?;
    change_charge_events(dat)?;
    change_hit_points(dat)?;
    change_train_location(dat)?;
    Ok(())
}

fn change_movement_speed(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making missionaries super speed");
    unit_editor::set_speed(dat, UnitSelector::Id(units::MISSIONARY), 2.0)?;

    log::info!("Making all villagers 50% slower");
    unit_editor::scale_speed(dat, UnitSelector::Class(unit_classes::CIVILIAN), 0.5)?;
    Ok(())
}

/// Graphics are where civs differ, so these edits touch a single civ.
fn change_graphics(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Giving the Armenian wonder to the Britons");
    unit_editor::copy_graphics(dat, units::WONDER, civilizations::ARMENIANS, civilizations::BRITONS)?;

    log::info!("Giving Persians the Central Asian architecture");
    unit_editor::copy_architecture(dat, civilizations::CUMANS, civilizations::PERSIANS)?;
    Ok(())
}

fn change_unit_costs(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making war elephants cost 85 gold");
    unit_editor::set_train_cost(
        dat,
        UnitSelector::Ids(&[units::WAR_ELEPHANT, units::ELITE_WAR_ELEPHANT]),
        costs::try_unit_train_cost([0, 0, 0, 85])?,
    )?;
    Ok(())
}

fn change_unit_storages(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making villagers cost 2 population space");
    unit_editor::set_resource_storages(
        dat,
        UnitSelector::Class(unit_classes::CIVILIAN),
        [
            ResourceStorage::new(resources::POPULATION_HEADROOM, -2.0, storage_flags::RETURN_ON_DEATH),
            ResourceStorage::new(resources::CURRENT_POPULATION, 2.0, storage_flags::RETURN_ON_DEATH),
            ResourceStorage::new(resources::TOTAL_UNITS_OWNED, 2.0, storage_flags::KEEP),
        ],
    )?;

    log::info!("Building a krepost gives you 1 gold");
    unit_editor::set_resource_storages(
        dat,
        UnitSelector::Id(units::KREPOST),
        [
            ResourceStorage::new(resources::POPULATION_HEADROOM, 20.0, storage_flags::RESET_ON_DEATH),
            ResourceStorage::new(resources::GOLD, 1.0, storage_flags::ON_COMPLETION),
            ResourceStorage::EMPTY,
        ],
    )?;

    log::info!("You can only have one standing castle at a time");
    // The castle resource is required, not paid: it is taken by the storage
    // on completion, so a player without one cannot place a foundation.
    set_civ_resource(dat, CivScope::All, CASTLE_RESOURCE, 1.0);
    unit_editor::set_train_cost(
        dat,
        UnitSelector::Id(units::CASTLE),
        [
            ResourceCost::paid(resources::STONE, 650),
            // Zero wood keeps a slot for effects that modify wood cost.
            ResourceCost::paid(resources::WOOD, 0),
            ResourceCost::required(CASTLE_RESOURCE, 1),
        ],
    )?;
    unit_editor::set_resource_storages(
        dat,
        UnitSelector::Id(units::CASTLE),
        [
            ResourceStorage::new(resources::POPULATION_HEADROOM, 20.0, storage_flags::RESET_ON_DEATH),
            ResourceStorage::new(resources::MERCENARY_KIPCHAK_COUNT, 0.0, storage_flags::MERCENARY_LIMIT),
            ResourceStorage::new(CASTLE_RESOURCE, -1.0, storage_flags::RETURN_ON_DEATH),
        ],
    )?;
    Ok(())
}

fn change_attacks(dat: &mut DatFile) -> Result<(), EditError> {
    let one_attack = DisplayedStats {
        attack: 1,
        ..Default::default()
    };

    log::info!("Giving slingers 1 extra attack");
    unit_editor::add_attack(dat, UnitSelector::Id(units::SLINGER), armor_classes::PIERCE, 1)?;
    unit_editor::add_displayed_stats(dat, UnitSelector::Id(units::SLINGER), one_attack)?;

    log::info!("Giving the knight line 1 extra attack");
    unit_editor::add_attack(dat, UnitSelector::Ids(&KNIGHT_LINE), armor_classes::MELEE, 1)?;
    unit_editor::add_displayed_stats(dat, UnitSelector::Ids(&KNIGHT_LINE), one_attack)?;

    log::info!("Giving all cavalry archers 1 bonus damage vs. infantry");
    unit_editor::add_attack(
        dat,
        UnitSelector::Class(unit_classes::CAVALRY_ARCHER),
        armor_classes::INFANTRY,
        1,
    )?;

    log::info!("Making arson give infantry bonus damage vs. siege");
    let arson = dat
        .tech(techs::ARSON)?
        .effect()
        .ok_or(EditError::NoEffect { tech: techs::ARSON })?;
    effects::append_command(
        dat,
        arson,
        effects::attribute_command(
            AttributeOp::Add,
            CommandScope::Player,
            CommandTarget::class(unit_classes::INFANTRY),
            attributes::ATTACK,
            effects::encode_amount_type(1, armor_classes::SIEGE_WEAPON),
        ),
    )?;
    // The command only raises existing entries, so infantry without a siege
    // bonus needs a zero one.
    let added = unit_editor::ensure_class_entry(
        dat,
        UnitSelector::Class(unit_classes::INFANTRY),
        DamageList::Attacks,
        armor_classes::SIEGE_WEAPON,
        0,
    )?;
    log::debug!("{} infantry copies gained a siege attack entry", added);
    Ok(())
}

fn change_armors(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Giving condottiero +1/+1P armor");
    let condottiero = UnitSelector::Id(units::CONDOTTIERO);
    unit_editor::add_armor(dat, condottiero, armor_classes::MELEE, 1)?;
    unit_editor::add_armor(dat, condottiero, armor_classes::PIERCE, 1)?;
    unit_editor::add_displayed_stats(
        dat,
        condottiero,
        DisplayedStats {
            melee_armor: 1,
            pierce_armor: 1,
            ..Default::default()
        },
    )?;

    log::info!("Making monks immune to pierce attacks");
    // Warrior priests without a relic are infantry by class, so match the line.
    let monks = |_: UnitId, unit: &Unit| {
        matches!(unit.unit_class(), unit_classes::MONK | unit_classes::MONK_WITH_RELIC)
            || unit.base_id == units::WARRIOR_PRIEST.raw()
    };
    unit_editor::remove_armor_class(dat, UnitSelector::Where(&monks), armor_classes::PIERCE)?;
    unit_editor::set_displayed_pierce_armor(dat, UnitSelector::Where(&monks), 999)?;

    log::info!("Giving war wagons +2 bonus damage vs. villagers");
    // No armor class covers villagers; class 10 is unused, so claim it.
    unit_editor::ensure_class_entry(
        dat,
        UnitSelector::Class(unit_classes::CIVILIAN),
        DamageList::Armours,
        armor_classes::UNUSED_10,
        0,
    )?;
    unit_editor::add_attack(
        dat,
        UnitSelector::Ids(&[units::WAR_WAGON, units::ELITE_WAR_WAGON]),
        armor_classes::UNUSED_10,
        2,
    )?;
    Ok(())
}

fn change_hero_mode(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making monks with relics unconvertible and regenerating");
    unit_editor::set_hero_mode(
        dat,
        UnitSelector::Class(unit_classes::MONK_WITH_RELIC),
        hero_flags::NO_CONVERSION | hero_flags::REGENERATION,
    )?;
    Ok(())
}

fn change_charge_events(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Buffing coustillier charge attack");
    unit_editor::scale_charge(dat, UnitSelector::Id(units::COUSTILLIER), 2.0)?;
    unit_editor::scale_charge(dat, UnitSelector::Id(units::ELITE_COUSTILLIER), 3.0)?;

    log::info!("Giving houses the ability to dodge projectiles");
    unit_editor::set_charge(
        dat,
        UnitSelector::Ids(&units::HOUSE_ALL),
        Charge {
            max_charge: 1.0,
            recharge_rate: 1.0,
            charge_event: 0,
            charge_type: 4,
        },
    )?;
    Ok(())
}

fn change_hit_points(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Giving bombard cannons 4000 HP");
    unit_editor::set_hit_points(
        dat,
        UnitSelector::Ids(&[units::BOMBARD_CANNON, units::HOUFNICE]),
        4000,
    )?;

    log::info!("Making all cavalry archers permanently have 1 HP");
    unit_editor::set_hit_points(dat, UnitSelector::Class(unit_classes::CAVALRY_ARCHER), 1)?;
    let removed = lock_class_hit_points(dat, unit_classes::CAVALRY_ARCHER);
    log::debug!("Removed {} hit point modifiers", removed);
    Ok(())
}

/// Remove every attribute modifier that changes hit points of `class`,
/// whether it targets the class or one of its units by slot.
pub fn lock_class_hit_points(dat: &mut DatFile, class: aoe2data::UnitClass) -> usize {
    let members: HashSet<UnitId> = dat
        .civ(civilizations::GAIA)
        .map(|gaia| {
            gaia.units
                .iter()
                .enumerate()
                .filter_map(|(slot, unit)| Some((slot, unit.as_ref()?)))
                .filter(|(_, unit)| unit.unit_class() == class)
                .map(|(slot, _)| UnitId(slot as i16))
                .collect()
        })
        .unwrap_or_default();

    effects::remove_commands_everywhere(dat, |cmd| {
        if cmd.attribute() != Some(attributes::HIT_POINTS) {
            return false;
        }
        match cmd.target() {
            Some(target) => {
                target.class == Some(class)
                    || target.unit.is_some_and(|unit| members.contains(&unit))
            }
            None => false,
        }
    })
}

fn change_train_location(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Moving hand cannoneers to lumber camps");
    unit_editor::set_train_location(
        dat,
        UnitSelector::Id(units::HAND_CANNONEER),
        units::LUMBER_CAMP,
        14,
    )?;

    log::info!("Making missionaries trainable at mining camps");
    // Button 4 at the mining camp is free; the default slot clashes with
    // stone mining.
    duplicate_unit(
        dat,
        units::MISSIONARY,
        Some(Retarget {
            train_location: units::MINING_CAMP,
            button_id: 4,
        }),
    )?;
    Ok(())
}
