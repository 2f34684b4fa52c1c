//! Technology editor.

use aoe2data::{DatFile, Tech, TechId, UnitId};

use crate::costs;
use crate::effects;
use crate::error::EditError;
use crate::saturate::{self, Saturated};

pub use crate::requirements::is_researchable;

fn tech_mut(dat: &mut DatFile, id: TechId) -> Result<&mut Tech, EditError> {
    Ok(dat.tech_mut(id)?)
}

pub fn set_name(dat: &mut DatFile, id: TechId, name: &str) -> Result<(), EditError> {
    tech_mut(dat, id)?.name = name.to_string();
    Ok(())
}

/// Set the string-table ids for the tech's name and description.
pub fn set_language_dll(
    dat: &mut DatFile,
    id: TechId,
    name: i32,
    description: i32,
) -> Result<(), EditError> {
    let tech = tech_mut(dat, id)?;
    tech.language_dll_name = name;
    tech.language_dll_description = description;
    Ok(())
}

/// Set the research cost from a `[food, wood, stone, gold]` input.
/// An input that does not fit leaves an empty cost and logs a warning.
pub fn set_research_cost(dat: &mut DatFile, id: TechId, costs: [i16; 4]) -> Result<(), EditError> {
    let tech = tech_mut(dat, id)?;
    tech.resource_costs = costs::tech_research_cost(costs);
    log::debug!("Tech ID {} ({}): cost {:?}", id, tech.name, costs);
    Ok(())
}

pub fn set_research_time(dat: &mut DatFile, id: TechId, time: i16) -> Result<(), EditError> {
    tech_mut(dat, id)?.research_time = time;
    Ok(())
}

/// Scale research time, saturating at 32767.
pub fn scale_research_time(dat: &mut DatFile, id: TechId, factor: f64) -> Result<Saturated, EditError> {
    let tech = tech_mut(dat, id)?;
    let original = tech.research_time;
    let scaled = saturate::scale_i16(original, factor);
    tech.research_time = scaled.value;
    log::debug!(
        "Tech ID {} ({}): research time {} -> {}{}",
        id,
        tech.name,
        original,
        scaled.value,
        if scaled.capped { " (capped)" } else { "" }
    );
    Ok(scaled)
}

pub fn set_button(dat: &mut DatFile, id: TechId, button_id: u8) -> Result<(), EditError> {
    tech_mut(dat, id)?.button_id = button_id;
    Ok(())
}

/// Move research to another building.
pub fn set_research_location(dat: &mut DatFile, id: TechId, location: UnitId) -> Result<(), EditError> {
    tech_mut(dat, id)?.research_location = location.raw();
    Ok(())
}

pub fn set_required_tech_count(dat: &mut DatFile, id: TechId, count: i16) -> Result<(), EditError> {
    tech_mut(dat, id)?.required_tech_count = count;
    Ok(())
}

/// Put `required` in the first empty prerequisite slot.
pub fn add_required_tech(dat: &mut DatFile, id: TechId, required: TechId) -> Result<(), EditError> {
    let tech = tech_mut(dat, id)?;
    let slot = tech
        .required_techs
        .iter_mut()
        .find(|slot| **slot == Tech::NO_TECH)
        .ok_or(EditError::PrerequisiteSlotsFull { tech: id })?;
    *slot = required.raw();
    Ok(())
}

/// What a duplicated tech's effect points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectLink {
    /// The copy applies the original's effect.
    #[default]
    Shared,
    /// The effect is duplicated too and the copy points at the new one.
    Copied,
}

/// Deep-copy a tech and append it. Returns the copy's id.
pub fn duplicate_tech(
    dat: &mut DatFile,
    id: TechId,
    name: Option<&str>,
    link: EffectLink,
) -> Result<TechId, EditError> {
    let mut copy = dat.tech(id)?.clone();
    if let Some(name) = name {
        copy.name = name.to_string();
    }
    if let (EffectLink::Copied, Some(effect)) = (link, copy.effect()) {
        let new_effect = effects::duplicate_effect(dat, effect, name)?;
        copy.effect_id = new_effect.raw();
    }
    let new_id = dat.push_tech(copy)?;
    log::debug!("Tech ID {} duplicated as {}", id, new_id);
    Ok(new_id)
}
