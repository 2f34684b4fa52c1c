//! Fan-out of unit edits over every civilization.
//!
//! Each civ owns a private copy of every unit slot, and the copies must stay
//! in step: a stat change made to one civ's knight and not the others is a
//! silent balance bug. Every stat editor in this crate goes through
//! [`for_each_unit`] so that no call site hand-rolls the civ loop.

use aoe2data::constants::civilizations;
use aoe2data::{CivId, DatError, DatFile, ResourceId, Unit, UnitClass, UnitId};

use crate::error::EditError;

/// Which civilizations an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CivScope {
    /// Every civ, GAIA included.
    #[default]
    All,
    /// Every civ except GAIA (civ 0).
    Playable,
    /// One civ. Only for civ-differentiated data such as graphics.
    Only(CivId),
}

impl CivScope {
    pub fn contains(self, civ: CivId) -> bool {
        match self {
            CivScope::All => true,
            CivScope::Playable => civ != civilizations::GAIA,
            CivScope::Only(only) => civ == only,
        }
    }
}

/// Which unit slots an edit applies to.
///
/// `Id` and `Ids` name slots explicitly, so a civ without that slot is an
/// error. The other selectors match whatever units exist.
#[derive(Clone, Copy)]
pub enum UnitSelector<'a> {
    Id(UnitId),
    Ids(&'a [UnitId]),
    Class(UnitClass),
    Classes(&'a [UnitClass]),
    Where(&'a dyn Fn(UnitId, &Unit) -> bool),
}

impl std::fmt::Debug for UnitSelector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSelector::Id(id) => write!(f, "Id({})", id),
            UnitSelector::Ids(ids) => write!(f, "Ids({:?})", ids),
            UnitSelector::Class(class) => write!(f, "Class({})", class),
            UnitSelector::Classes(classes) => write!(f, "Classes({:?})", classes),
            UnitSelector::Where(_) => write!(f, "Where(..)"),
        }
    }
}

impl UnitSelector<'_> {
    fn explicit_ids(&self) -> &[UnitId] {
        match self {
            UnitSelector::Id(id) => std::slice::from_ref(id),
            UnitSelector::Ids(ids) => ids,
            _ => &[],
        }
    }

    fn matches(&self, slot: UnitId, unit: &Unit) -> bool {
        match self {
            UnitSelector::Id(id) => *id == slot,
            UnitSelector::Ids(ids) => ids.contains(&slot),
            UnitSelector::Class(class) => unit.unit_class() == *class,
            UnitSelector::Classes(classes) => classes.contains(&unit.unit_class()),
            UnitSelector::Where(pred) => pred(slot, unit),
        }
    }
}

/// Apply `edit` to every civ's copy of the selected units.
///
/// Returns how many unit copies were edited.
pub fn for_each_unit<F>(
    dat: &mut DatFile,
    selector: UnitSelector<'_>,
    edit: F,
) -> Result<usize, EditError>
where
    F: FnMut(CivId, UnitId, &mut Unit) -> Result<(), EditError>,
{
    for_each_unit_in(dat, CivScope::All, selector, edit)
}

/// [`for_each_unit`] restricted to `scope`.
pub fn for_each_unit_in<F>(
    dat: &mut DatFile,
    scope: CivScope,
    selector: UnitSelector<'_>,
    mut edit: F,
) -> Result<usize, EditError>
where
    F: FnMut(CivId, UnitId, &mut Unit) -> Result<(), EditError>,
{
    let mut edited = 0;
    for (civ_id, civ) in dat.civ_ids().zip(dat.civs.iter_mut()) {
        if !scope.contains(civ_id) {
            continue;
        }

        // Explicit slots must exist in every civ; a hole means the civs diverged.
        for &unit in selector.explicit_ids() {
            if civ.unit(unit).is_none() {
                return Err(DatError::MissingUnit { civ: civ_id, unit }.into());
            }
        }

        for (index, slot) in civ.units.iter_mut().enumerate() {
            let Some(unit) = slot.as_mut() else {
                continue;
            };
            let slot_id = UnitId(index as i16);
            if selector.matches(slot_id, unit) {
                edit(civ_id, slot_id, unit)?;
                edited += 1;
            }
        }
    }

    log::trace!("Edited {} unit copies matching {:?}", edited, selector);
    Ok(edited)
}

/// GAIA's copy of a unit, used as the reference copy for read-only queries
/// such as "what class is unit N".
pub fn reference_unit(dat: &DatFile, unit: UnitId) -> Result<&Unit, EditError> {
    Ok(dat.unit(civilizations::GAIA, unit)?)
}

/// Set a starting resource for every civ in `scope`.
pub fn set_civ_resource(dat: &mut DatFile, scope: CivScope, resource: ResourceId, value: f32) {
    for (civ_id, civ) in dat.civ_ids().zip(dat.civs.iter_mut()) {
        if scope.contains(civ_id) {
            civ.set_resource(resource, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DatFileBuilder;
    use aoe2data::constants::unit_classes;

    fn dat() -> DatFile {
        DatFileBuilder::new()
            .civs(3)
            .unit(4, "Archer", unit_classes::ARCHER)
            .unit(7, "Skirmisher", unit_classes::ARCHER)
            .unit(83, "Villager", unit_classes::CIVILIAN)
            .build()
    }

    #[test]
    fn test_edit_reaches_every_civ() {
        let mut dat = dat();
        let n = for_each_unit(&mut dat, UnitSelector::Id(UnitId(4)), |_, _, u| {
            u.hit_points = 99;
            Ok(())
        })
        .unwrap();

        assert_eq!(n, 3);
        for civ in &dat.civs {
            assert_eq!(civ.unit(UnitId(4)).unwrap().hit_points, 99);
            assert_ne!(civ.unit(UnitId(7)).unwrap().hit_points, 99);
        }
    }

    #[test]
    fn test_class_selector_skips_empty_slots() {
        let mut dat = dat();
        let n = for_each_unit(
            &mut dat,
            UnitSelector::Class(unit_classes::ARCHER),
            |_, _, _| Ok(()),
        )
        .unwrap();
        assert_eq!(n, 6);
    }

    #[test]
    fn test_playable_scope_skips_gaia() {
        let mut dat = dat();
        let mut seen = Vec::new();
        for_each_unit_in(
            &mut dat,
            CivScope::Playable,
            UnitSelector::Id(UnitId(83)),
            |civ, _, _| {
                seen.push(civ);
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(seen, vec![CivId(1), CivId(2)]);
    }

    #[test]
    fn test_missing_explicit_slot_is_an_error() {
        let mut dat = dat();
        dat.civs[2].units[7] = None;

        let res = for_each_unit(&mut dat, UnitSelector::Ids(&[UnitId(4), UnitId(7)]), |_, _, _| {
            Ok(())
        });
        assert!(matches!(
            res,
            Err(EditError::Dat(DatError::MissingUnit { civ: CivId(2), unit: UnitId(7) }))
        ));
    }

    #[test]
    fn test_edit_error_stops_fanout() {
        let mut dat = dat();
        let mut calls = 0;
        let res = for_each_unit(&mut dat, UnitSelector::Id(UnitId(4)), |civ, unit, _| {
            calls += 1;
            Err(EditError::MissingCreatable { civ, unit })
        });
        assert!(res.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_set_civ_resource_respects_scope() {
        let mut dat = dat();
        set_civ_resource(&mut dat, CivScope::Playable, ResourceId(120), 1.0);
        assert!(dat.civs[0].resources.len() <= 120);
        assert_eq!(dat.civs[1].resources[120], 1.0);
        assert_eq!(dat.civs[2].resources[120], 1.0);
    }
}
