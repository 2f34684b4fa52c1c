//! Required-tech gate.
//!
//! A tech lists up to six prerequisites and a count. It becomes researchable
//! once at least `required_tech_count` of the listed prerequisites are done,
//! which makes "any one of these" an ordinary count of 1.

use aoe2data::{Tech, TechId};

/// Whether `tech` is researchable given which techs are `satisfied`.
pub fn is_researchable<F>(tech: &Tech, satisfied: F) -> bool
where
    F: Fn(TechId) -> bool,
{
    let done = tech.prerequisites().filter(|&id| satisfied(id)).count();
    done as i64 >= tech.required_tech_count as i64
}
