//! Starting point for your own edits.

use aoe2data::DatFile;
use tracing::instrument;

use crate::error::EditError;

pub const NAME: &str = "custom_modifications";

#[instrument(skip_all, name = "custom_modifications")]
pub fn run_custom_modifications(dat: &mut DatFile) -> Result<(), EditError> {
    log::info!("Your code goes here:");
    log::debug!("Dat {} has {} civilizations", dat.version, dat.civs.len());
    Ok(())
}
