//! Unit duplication.
//!
//! A duplicate is appended to every civ's unit list and so gets the same new
//! trailing id everywhere. Effects that name the original by id are then
//! copied to name the duplicate as well, so techs that upgrade the original
//! upgrade the copy too.

use aoe2data::{DatFile, UnitId};

use crate::civs;
use crate::effects::Command;
use crate::error::EditError;

/// Where a duplicate is trained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retarget {
    pub train_location: UnitId,
    pub button_id: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDuplicate {
    pub id: UnitId,
    /// Effect commands cloned to reference the duplicate.
    pub propagated: usize,
}

/// Copy `unit` into a new slot in every civ and propagate effect commands.
pub fn duplicate_unit(
    dat: &mut DatFile,
    unit: UnitId,
    retarget: Option<Retarget>,
) -> Result<UnitDuplicate, EditError> {
    civs::reference_unit(dat, unit)?;

    let mut new_id: Option<UnitId> = None;
    for (civ_id, civ) in dat.civ_ids().zip(dat.civs.iter_mut()) {
        let mut copy = civ.unit(unit).cloned();
        let id = civ.push_unit(None)?;
        match new_id {
            None => new_id = Some(id),
            Some(expected) if expected != id => {
                return Err(EditError::CivDivergence {
                    civ: civ_id,
                    expected,
                    got: id,
                });
            }
            Some(_) => {}
        }

        if let Some(copy) = copy.as_mut() {
            copy.id = id.raw();
            copy.base_id = id.raw();
            copy.copy_id = id.raw();
            if let Some(retarget) = retarget {
                let creatable = copy
                    .creatable
                    .as_mut()
                    .ok_or(EditError::MissingCreatable { civ: civ_id, unit })?;
                creatable.train_location_id = retarget.train_location.raw();
                creatable.button_id = retarget.button_id;
            }
        }
        civ.units[id.raw() as usize] = copy;
    }

    // reference_unit succeeded, so there is at least one civ.
    let id = new_id.ok_or(aoe2data::DatError::MissingUnit {
        civ: aoe2data::constants::civilizations::GAIA,
        unit,
    })?;
    let propagated = propagate_unit_commands(dat, unit, id);
    log::info!(
        "Unit ID {} duplicated as {}, {} effect commands propagated",
        unit,
        id,
        propagated
    );
    Ok(UnitDuplicate { id, propagated })
}

/// For every command that names `from` as its unit operand, append a copy
/// naming `to` to the same effect. Returns how many were added.
///
/// Covers attribute modifiers (set, add, multiply) and enable/disable.
pub fn propagate_unit_commands(dat: &mut DatFile, from: UnitId, to: UnitId) -> usize {
    let mut added = 0;
    for effect in &mut dat.effects {
        let copies: Vec<_> = effect
            .effect_commands
            .iter()
            .map(|raw| Command::decode(*raw))
            .filter(|cmd| cmd.unit_operand() == Some(from))
            .map(|cmd| cmd.with_unit_operand(to))
            .collect();
        if !copies.is_empty() {
            log::debug!(
                "Effect {}: {} commands copied from unit {} to {}",
                effect.name,
                copies.len(),
                from,
                to
            );
        }
        added += copies.len();
        effect.effect_commands.extend(copies);
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DatFileBuilder;
    use aoe2data::constants::{unit_classes, units};
    use aoe2data::{CivId, EffectCommand};
    use proptest::prelude::*;

    fn dat() -> DatFile {
        DatFileBuilder::new()
            .civs(3)
            .unit(775, "Missionary", unit_classes::MONK)
            .unit(584, "Mining Camp", unit_classes::BUILDING)
            .effect(
                0,
                "Fervor",
                vec![
                    EffectCommand::new(5, 775, -1, 5, 1.15),
                    EffectCommand::new(5, -1, 18, 5, 1.15),
                    EffectCommand::new(1, 3, 0, -1, 100.0),
                ],
            )
            .effect(1, "Missionary enable", vec![EffectCommand::new(2, 775, 1, -1, 0.0)])
            .build()
    }

    #[test]
    fn test_duplicate_appends_to_every_civ() {
        let mut dat = dat();
        let dup = duplicate_unit(
            &mut dat,
            units::MISSIONARY,
            Some(Retarget {
                train_location: units::MINING_CAMP,
                button_id: 4,
            }),
        )
        .unwrap();

        assert_eq!(dup.id, UnitId(776));
        for civ in 0..3 {
            let copy = dat.unit(CivId(civ), dup.id).unwrap();
            assert_eq!((copy.id, copy.base_id, copy.copy_id), (776, 776, 776));
            assert_eq!(copy.name, "Missionary");
            let creatable = copy.creatable.as_ref().unwrap();
            assert_eq!(creatable.train_location_id, 584);
            assert_eq!(creatable.button_id, 4);

            let original = dat.unit(CivId(civ), units::MISSIONARY).unwrap();
            assert_eq!(original.id, 775);
            assert_eq!(original.creatable.as_ref().unwrap().train_location_id, -1);
        }
    }

    #[test]
    fn test_propagation_is_additive() {
        let mut dat = dat();
        let dup = duplicate_unit(&mut dat, units::MISSIONARY, None).unwrap();
        assert_eq!(dup.propagated, 2);

        let fervor = &dat.effects[0].effect_commands;
        assert_eq!(fervor.len(), 4);
        assert_eq!(fervor[0].a, 775);
        assert_eq!(fervor[3], EffectCommand::new(5, 776, -1, 5, 1.15));

        let enable = &dat.effects[1].effect_commands;
        assert_eq!(enable.len(), 2);
        assert_eq!(enable[1], EffectCommand::new(2, 776, 1, -1, 0.0));
    }

    #[test]
    fn test_duplicate_missing_unit_is_an_error() {
        let mut dat = dat();
        assert!(duplicate_unit(&mut dat, UnitId(4), None).is_err());
        assert_eq!(dat.civs[0].units.len(), 776);
    }

    #[test]
    fn test_retarget_requires_creatable() {
        let mut dat = dat();
        for civ in &mut dat.civs {
            civ.units[775].as_mut().unwrap().creatable = None;
        }
        let res = duplicate_unit(
            &mut dat,
            units::MISSIONARY,
            Some(Retarget {
                train_location: units::MINING_CAMP,
                button_id: 4,
            }),
        );
        assert!(matches!(res, Err(EditError::MissingCreatable { .. })));
    }

    #[test]
    fn test_diverged_civ_is_detected() {
        let mut dat = dat();
        dat.civs[2].units.push(None);
        let res = duplicate_unit(&mut dat, units::MISSIONARY, None);
        assert!(matches!(
            res,
            Err(EditError::CivDivergence {
                civ: CivId(2),
                expected: UnitId(776),
                got: UnitId(777)
            })
        ));
    }

    #[test]
    fn test_team_and_enemy_commands_propagate() {
        let mut dat = DatFileBuilder::new()
            .unit(775, "Missionary", unit_classes::MONK)
            .effect(
                0,
                "Team bonus",
                vec![
                    EffectCommand::new(14, 775, -1, 5, 1.0),
                    EffectCommand::new(25, 775, -1, 5, 0.9),
                    EffectCommand::new(23, 775, 776, -1, 0.0),
                ],
            )
            .build();
        let dup = duplicate_unit(&mut dat, units::MISSIONARY, None).unwrap();

        assert_eq!(dup.propagated, 2);
        let commands = &dat.effects[0].effect_commands;
        assert_eq!(commands[3], EffectCommand::new(14, 776, -1, 5, 1.0));
        assert_eq!(commands[4], EffectCommand::new(25, 776, -1, 5, 0.9));
    }

    proptest! {
        #[test]
        fn prop_propagation_doubles_references(
            picks in prop::collection::vec((0u8..30, prop::bool::ANY), 0..30)
        ) {
            // Each pick is a command type (player, team or enemy scope) and
            // whether it names unit 775.
            let commands: Vec<EffectCommand> = picks
                .iter()
                .map(|&(t, refers)| EffectCommand::new(t, if refers { 775 } else { 4 }, -1, 0, 1.0))
                .collect();
            let referencing = commands
                .iter()
                .filter(|c| c.a == 775 && matches!(c.type_ % 10, 0 | 2 | 4 | 5))
                .count();

            let mut dat = DatFileBuilder::new()
                .unit(775, "Missionary", unit_classes::MONK)
                .effect(0, "Test", commands.clone())
                .build();
            let dup = duplicate_unit(&mut dat, units::MISSIONARY, None).unwrap();

            let after = &dat.effects[0].effect_commands;
            prop_assert_eq!(dup.propagated, referencing);
            prop_assert_eq!(after.len(), commands.len() + referencing);
            prop_assert_eq!(&after[..commands.len()], &commands[..]);
            prop_assert!(after[commands.len()..].iter().all(|c| c.a == dup.id.raw()));
        }
    }
}
