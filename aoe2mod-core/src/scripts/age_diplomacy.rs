//! "Age of Diplomacy" balance mod: sturdier, slower-to-build buildings, one
//! town center and one market per player, slower eco units and faster
//! trash units.

use aoe2data::constants::{resources, storage_flags, techs, unit_classes, units};
use aoe2data::{DatFile, ResourceCost, ResourceId, ResourceStorage, Unit, UnitClass, UnitId};
use tracing::instrument;

use crate::civs::{for_each_unit, for_each_unit_in, set_civ_resource, CivScope, UnitSelector};
use crate::error::EditError;
use crate::techs as tech_editor;
use crate::units::{
    scale_unit_hit_points, scale_unit_train_time, set_resource_storages_in, set_train_cost_in,
    ARCHITECTURE_CLASSES,
};

pub const NAME: &str = "age_diplomacy";

/// Civ resource counting town centers a player may still build.
pub const TOWN_CENTER_RESOURCE: ResourceId = ResourceId(120);
/// Civ resource counting markets a player may still build.
pub const MARKET_RESOURCE: ResourceId = ResourceId(61);

const AGE_RESEARCH_MULTIPLIER: f64 = 1.2;

const SPEAR_AND_SKIRMISHER_LINES: [UnitId; 10] = [
    units::SPEARMAN,
    units::PIKEMAN,
    units::HEAVY_PIKEMAN,
    units::PIKEMAN_DONJON,
    units::SPEARMAN_DONJON,
    units::HALBERDIER,
    units::HALBERDIER_DONJON,
    units::SKIRMISHER,
    units::ELITE_SKIRMISHER,
    units::IMPERIAL_SKIRMISHER,
];

#[instrument(skip_all, name = "age_diplomacy")]
pub fn run_age_diplomacy(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making age research take longer");
    for age in [techs::FEUDAL_AGE, techs::CASTLE_AGE, techs::IMPERIAL_AGE] {
        tech_editor::scale_research_time(dat, age, AGE_RESEARCH_MULTIPLIER)?;
    }

    single_town_center(dat)?;
    slower_villager_training(dat)?;
    slower_trade_unit_training(dat)?;
    stronger_buildings(dat)?;
    slower_construction(dat)?;
    faster_spear_and_skirmisher_training(dat)?;
    single_market(dat)?;
    slower_siege_towers(dat)?;
    Ok(())
}

/// Units of `class` that can be trained or built.
fn trainable_of(class: UnitClass) -> impl Fn(UnitId, &Unit) -> bool {
    move |_: UnitId, unit: &Unit| unit.unit_class() == class && unit.creatable.is_some()
}

fn single_town_center(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("You can only have one standing town center at a time");
    set_civ_resource(dat, CivScope::Playable, TOWN_CENTER_RESOURCE, 1.0);

    let town_centers = UnitSelector::Ids(&units::TOWN_CENTER_ALL);
    set_train_cost_in(
        dat,
        CivScope::Playable,
        town_centers,
        [
            ResourceCost::paid(resources::STONE, 100),
            ResourceCost::paid(resources::WOOD, 200),
            ResourceCost::required(TOWN_CENTER_RESOURCE, 1),
        ],
    )?;
    // Headroom for this player only; the slot is taken on completion and
    // given back when the town center falls.
    set_resource_storages_in(
        dat,
        CivScope::Playable,
        town_centers,
        [
            ResourceStorage::new(resources::POPULATION_HEADROOM, 5.0, storage_flags::RESET_ON_DEATH),
            ResourceStorage::new(TOWN_CENTER_RESOURCE, -1.0, storage_flags::RETURN_ON_DEATH),
            ResourceStorage::EMPTY,
        ],
    )?;
    Ok(())
}

fn slower_villager_training(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making villagers take longer to train");
    let villagers = trainable_of(unit_classes::CIVILIAN);
    for_each_unit(dat, UnitSelector::Where(&villagers), |civ, slot, unit| {
        scale_unit_train_time(civ, slot, unit, 1.2).map(|_| ())
    })?;
    Ok(())
}

fn slower_trade_unit_training(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making trade carts and trade cogs take longer to train");
    let traders = |_: UnitId, unit: &Unit| {
        matches!(unit.unit_class(), unit_classes::TRADE_CART | unit_classes::TRADE_BOAT)
            && unit.creatable.is_some()
    };
    for_each_unit(dat, UnitSelector::Where(&traders), |civ, slot, unit| {
        scale_unit_train_time(civ, slot, unit, 2.0).map(|_| ())
    })?;
    Ok(())
}

fn is_keystone_building(slot: UnitId) -> bool {
    slot == units::CASTLE || slot == units::DONJON || units::TOWN_CENTER_ALL.contains(&slot)
}

/// Hit point multiplier for a building.
pub fn building_hp_factor(slot: UnitId, unit: &Unit) -> f64 {
    let class = unit.unit_class();
    if is_keystone_building(slot) || class == unit_classes::WALL || class == unit_classes::TOWER {
        3.0
    } else {
        2.0
    }
}

/// Build time multiplier for a building. Castles and towers build slowest
/// so stronger fortifications cannot be rushed forward.
pub fn build_time_factor(slot: UnitId, unit: &Unit) -> f64 {
    let class = unit.unit_class();
    if slot == units::CASTLE
        || slot == units::DONJON
        || class == unit_classes::WALL
        || class == unit_classes::TOWER
    {
        2.0
    } else {
        1.6
    }
}

fn stronger_buildings(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Tripling health of key buildings, doubling the rest");
    for_each_unit(dat, UnitSelector::Classes(&ARCHITECTURE_CLASSES), |_, slot, unit| {
        let factor = building_hp_factor(slot, unit);
        scale_unit_hit_points(unit, factor);
        Ok(())
    })?;
    Ok(())
}

fn slower_construction(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making buildings, walls and towers take longer to build");
    let buildings = |_: UnitId, unit: &Unit| {
        ARCHITECTURE_CLASSES.contains(&unit.unit_class()) && unit.creatable.is_some()
    };
    for_each_unit(dat, UnitSelector::Where(&buildings), |civ, slot, unit| {
        let factor = build_time_factor(slot, unit);
        scale_unit_train_time(civ, slot, unit, factor).map(|_| ())
    })?;
    Ok(())
}

fn faster_spear_and_skirmisher_training(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Halving train time of the spearman and skirmisher lines");
    let lines = |slot: UnitId, unit: &Unit| {
        SPEAR_AND_SKIRMISHER_LINES.contains(&slot) && unit.creatable.is_some()
    };
    for_each_unit(dat, UnitSelector::Where(&lines), |civ, slot, unit| {
        scale_unit_train_time(civ, slot, unit, 0.5).map(|_| ())
    })?;
    Ok(())
}

fn single_market(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("You can only have one standing market at a time");
    set_civ_resource(dat, CivScope::Playable, MARKET_RESOURCE, 1.0);

    let markets = |slot: UnitId, unit: &Unit| {
        units::MARKET_ALL.contains(&slot) && unit.creatable.is_some()
    };
    let markets = UnitSelector::Where(&markets);
    set_train_cost_in(
        dat,
        CivScope::Playable,
        markets,
        [
            ResourceCost::paid(resources::STONE, 0),
            ResourceCost::paid(resources::WOOD, 175),
            ResourceCost::required(MARKET_RESOURCE, 1),
        ],
    )?;
    set_resource_storages_in(
        dat,
        CivScope::Playable,
        markets,
        [
            ResourceStorage::new(resources::POPULATION_HEADROOM, 0.0, storage_flags::RESET_ON_DEATH),
            ResourceStorage::new(MARKET_RESOURCE, -1.0, storage_flags::RETURN_ON_DEATH),
            ResourceStorage::EMPTY,
        ],
    )?;
    Ok(())
}

fn slower_siege_towers(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Making siege towers slower and cost 50 gold, 200 wood");
    let siege_towers = |slot: UnitId, _: &Unit| slot == units::SIEGE_TOWER;
    for_each_unit_in(
        dat,
        CivScope::All,
        UnitSelector::Where(&siege_towers),
        |civ, _, unit| {
            unit.speed *= 0.5;
            match unit.creatable.as_mut() {
                Some(creatable) => {
                    creatable.resource_costs = [
                        ResourceCost::paid(resources::GOLD, 50),
                        ResourceCost::paid(resources::WOOD, 200),
                        ResourceCost::EMPTY,
                    ];
                }
                None => log::warn!(
                    "Siege tower of civilization {} has no creatable data, cost not changed",
                    civ
                ),
            }
            Ok(())
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DatFileBuilder;
    use aoe2data::{CivId, Tech, TechId};

    fn dat() -> DatFile {
        let age = |time| Tech {
            research_time: time,
            ..Default::default()
        };
        let mut dat = DatFileBuilder::new()
            .civs(3)
            .unit(83, "Villager", unit_classes::CIVILIAN)
            .unit(128, "Trade Cart", unit_classes::TRADE_CART)
            .unit(93, "Spearman", unit_classes::INFANTRY)
            .unit(7, "Skirmisher", unit_classes::ARCHER)
            .unit(4, "Archer", unit_classes::ARCHER)
            .unit(82, "Castle", unit_classes::BUILDING)
            .unit(70, "House", unit_classes::BUILDING)
            .unit(72, "Palisade Wall", unit_classes::WALL)
            .unit(79, "Watch Tower", unit_classes::TOWER)
            .unit(84, "Market", unit_classes::BUILDING)
            .unit(1105, "Siege Tower", unit_classes::SIEGE_WEAPON)
            .tech(101, age(130))
            .tech(102, age(160))
            .tech(103, age(190))
            .build();
        for &tc in &units::TOWN_CENTER_ALL {
            let mut unit = dat.civs[0].units[82].clone().unwrap_or_default();
            unit.id = tc.raw();
            unit.name = "Town Center".into();
            for civ in &mut dat.civs {
                civ.units[tc.raw() as usize] = Some(unit.clone());
            }
        }
        for civ in &mut dat.civs {
            for slot in [70usize, 72, 79, 82, 84] {
                let unit = civ.units[slot].as_mut().unwrap();
                unit.hit_points = 2000;
                unit.creatable.as_mut().unwrap().train_time = 100;
            }
            civ.units[72].as_mut().unwrap().hit_points = 20000;
        }
        dat
    }

    fn unit(dat: &DatFile, civ: u8, id: UnitId) -> &Unit {
        dat.unit(CivId(civ), id).unwrap()
    }

    fn train_time(dat: &DatFile, civ: u8, id: UnitId) -> i16 {
        unit(dat, civ, id).creatable.as_ref().unwrap().train_time
    }

    #[test]
    fn test_age_research_time() {
        let mut dat = dat();
        run_age_diplomacy(&mut dat).unwrap();
        assert_eq!(dat.tech(TechId(101)).unwrap().research_time, 156);
        assert_eq!(dat.tech(TechId(102)).unwrap().research_time, 192);
        assert_eq!(dat.tech(TechId(103)).unwrap().research_time, 228);
    }

    #[test]
    fn test_single_town_center() {
        let mut dat = dat();
        run_age_diplomacy(&mut dat).unwrap();

        assert!(dat.civs[0].resources.len() <= 120);
        for civ in 1..3 {
            assert_eq!(dat.civs[civ].resources[120], 1.0);
            for &tc in &units::TOWN_CENTER_ALL {
                let tc = unit(&dat, civ as u8, tc);
                let costs = tc.creatable.as_ref().unwrap().resource_costs;
                assert_eq!(costs[2], ResourceCost::required(TOWN_CENTER_RESOURCE, 1));
                assert_eq!(tc.resource_storages[1].resource, 120);
                assert_eq!(tc.resource_storages[1].flag, storage_flags::RETURN_ON_DEATH);
            }
        }
        let gaia_tc = unit(&dat, 0, units::TOWN_CENTER);
        assert!(gaia_tc.creatable.as_ref().unwrap().resource_costs[0].is_empty());
    }

    #[test]
    fn test_training_times() {
        let mut dat = dat();
        run_age_diplomacy(&mut dat).unwrap();
        for civ in 0..3 {
            assert_eq!(train_time(&dat, civ, UnitId(83)), 36);
            assert_eq!(train_time(&dat, civ, UnitId(128)), 60);
            assert_eq!(train_time(&dat, civ, units::SPEARMAN), 15);
            assert_eq!(train_time(&dat, civ, units::SKIRMISHER), 15);
            assert_eq!(train_time(&dat, civ, UnitId(4)), 30);
        }
    }

    #[test]
    fn test_halved_train_time_floors_at_one() {
        let mut dat = dat();
        for civ in &mut dat.civs {
            civ.units[93].as_mut().unwrap().creatable.as_mut().unwrap().train_time = 1;
            civ.units[7].as_mut().unwrap().creatable.as_mut().unwrap().train_time = -1;
        }
        run_age_diplomacy(&mut dat).unwrap();
        assert_eq!(train_time(&dat, 1, units::SPEARMAN), 1);
        assert_eq!(train_time(&dat, 1, units::SKIRMISHER), -1);
    }

    #[test]
    fn test_building_health_and_build_time() {
        let mut dat = dat();
        run_age_diplomacy(&mut dat).unwrap();
        for civ in 0..3 {
            assert_eq!(unit(&dat, civ, units::CASTLE).hit_points, 6000);
            assert_eq!(unit(&dat, civ, units::HOUSE).hit_points, 4000);
            assert_eq!(unit(&dat, civ, UnitId(79)).hit_points, 6000);
            // 20000 * 3 does not fit.
            assert_eq!(unit(&dat, civ, UnitId(72)).hit_points, 32767);

            assert_eq!(train_time(&dat, civ, units::CASTLE), 200);
            assert_eq!(train_time(&dat, civ, units::HOUSE), 160);
            assert_eq!(train_time(&dat, civ, UnitId(72)), 200);
        }
    }

    #[test]
    fn test_towers_and_walls_build_slowest() {
        let mut dat = dat();
        for civ in &mut dat.civs {
            civ.units[79].as_mut().unwrap().creatable.as_mut().unwrap().train_time = 80;
        }
        run_age_diplomacy(&mut dat).unwrap();
        for civ in 0..3 {
            assert_eq!(train_time(&dat, civ, UnitId(79)), 160);
            assert_eq!(train_time(&dat, civ, UnitId(72)), 200);
            assert_eq!(train_time(&dat, civ, UnitId(4)), 30);
        }
    }

    #[test]
    fn test_single_market() {
        let mut dat = dat();
        run_age_diplomacy(&mut dat).unwrap();
        let market = unit(&dat, 1, units::MARKET);
        let costs = market.creatable.as_ref().unwrap().resource_costs;
        assert_eq!(costs[1], ResourceCost::paid(resources::WOOD, 175));
        assert_eq!(costs[2], ResourceCost::required(MARKET_RESOURCE, 1));
        assert_eq!(dat.civs[2].resources[61], 1.0);
    }

    #[test]
    fn test_siege_tower() {
        let mut dat = dat();
        run_age_diplomacy(&mut dat).unwrap();
        let tower = unit(&dat, 2, units::SIEGE_TOWER);
        assert_eq!(tower.speed, 0.5);
        let costs = tower.creatable.as_ref().unwrap().resource_costs;
        assert_eq!(costs[0], ResourceCost::paid(resources::GOLD, 50));
        assert_eq!(costs[1], ResourceCost::paid(resources::WOOD, 200));
        assert!(costs[2].is_empty());
    }

    #[test]
    fn test_missing_town_center_aborts() {
        let mut dat = dat();
        dat.civs[2].units[71] = None;
        assert!(run_age_diplomacy(&mut dat).is_err());
    }
}
