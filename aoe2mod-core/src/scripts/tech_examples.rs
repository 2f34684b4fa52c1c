//! Worked examples of tech edits: costs, button layout, research location,
//! duplication.

use aoe2data::constants::{techs, units};
use aoe2data::DatFile;
use tracing::instrument;

use crate::error::EditError;
use crate::techs::{self as tech_editor, EffectLink};

pub const NAME: &str = "tech_examples";

#[instrument(skip_all, name = "tech_examples")]
pub fn run_tech_examples(dat: &mut DatFile) -> Result<(), EditError> {
    change_tech_costs(dat)?;
    change_tech_button_location(dat)?;
    change_tech_research_location(dat)?;
    Ok(())
}

fn change_tech_costs(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Setting Corvinian Army cost to 69 food, 420 stone");
    tech_editor::set_research_cost(dat, techs::CORVINIAN_ARMY, [69, 0, 420, 0])?;

    log::info!("Setting Hul'che Javelineers cost to 300 food, 300 stone");
    tech_editor::set_research_cost(dat, techs::HULCHE_JAVELINEERS, [300, 0, 300, 0])?;
    Ok(())
}

/// Buttons are numbered row by row on a 5x3 grid:
///
/// ```text
///  1   2   3   4   5
///  6   7   8   9  10
/// 11  12  13  14  15
/// ```
///
/// 5 and 15 may hold the flag or town bell. Two techs on one button are
/// researched one after the other; a unit on a tech's button can hide it for
/// good.
fn change_tech_button_location(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Moving loom to the bottom row");
    tech_editor::set_button(dat, techs::LOOM, 12)
}

fn change_tech_research_location(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Moving wheelbarrow to the lumber camp");
    tech_editor::set_research_location(dat, techs::WHEELBARROW, units::LUMBER_CAMP)?;

    // One research location per tech, so a second location needs a copy.
    log::info!("Copying wheelbarrow to the mill");
    let copy = tech_editor::duplicate_tech(
        dat,
        techs::WHEELBARROW,
        Some("Wheelbarrow mill"),
        EffectLink::Shared,
    )?;
    tech_editor::set_research_location(dat, copy, units::MILL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::DatFileBuilder;
    use aoe2data::constants::resources;
    use aoe2data::{ResearchResourceCost, Tech, TechId};

    fn dat() -> DatFile {
        let named = |name: &str| Tech {
            name: name.into(),
            research_location: 109,
            effect_id: 7,
            ..Default::default()
        };
        DatFileBuilder::new()
            .tech(22, named("Loom"))
            .tech(213, named("Wheelbarrow"))
            .tech(514, named("Corvinian Army"))
            .tech(516, named("Hul'che Javelineers"))
            .build()
    }

    #[test]
    fn test_tech_examples() {
        let mut dat = dat();
        run_tech_examples(&mut dat).unwrap();

        let corvinian = dat.tech(techs::CORVINIAN_ARMY).unwrap();
        assert_eq!(
            corvinian.resource_costs,
            [
                ResearchResourceCost::paid(resources::FOOD, 69),
                ResearchResourceCost::paid(resources::STONE, 420),
                ResearchResourceCost::EMPTY,
            ]
        );
        let hulche = dat.tech(techs::HULCHE_JAVELINEERS).unwrap();
        assert_eq!(hulche.resource_costs[1].amount, 300);

        assert_eq!(dat.tech(techs::LOOM).unwrap().button_id, 12);
        assert_eq!(dat.tech(techs::WHEELBARROW).unwrap().research_location, 562);

        assert_eq!(dat.techs.len(), 518);
        let copy = dat.tech(TechId(517)).unwrap();
        assert_eq!(copy.name, "Wheelbarrow mill");
        assert_eq!(copy.research_location, 68);
        assert_eq!(copy.effect_id, 7);
    }

    #[test]
    fn test_missing_tech_aborts() {
        let mut dat = DatFileBuilder::new().build();
        assert!(run_tech_examples(&mut dat).is_err());
    }
}
