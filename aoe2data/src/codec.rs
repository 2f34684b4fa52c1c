//! Boundary to the dat reader/writer.
//!
//! Decoding the binary dat format is not done here. A codec only has to turn a
//! path into a [`DatFile`] and back; everything else in the toolkit works on the
//! object graph. [`JsonDatCodec`] handles the JSON snapshot form of that graph,
//! which is what dat libraries export and what the snapshot cache stores.

use crate::error::DatError;
use crate::model::DatFile;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub trait DatCodec {
    /// Read a dat file into memory.
    fn parse(&self, path: &Path) -> Result<DatFile, DatError>;

    /// Write the whole object graph to `path`, replacing it.
    fn save(&self, dat: &DatFile, path: &Path) -> Result<(), DatError>;
}

/// Reads and writes the JSON snapshot representation of a [`DatFile`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDatCodec {
    /// Pretty-print output. Slower and larger, but diffable.
    pub pretty: bool,
}

impl DatCodec for JsonDatCodec {
    fn parse(&self, path: &Path) -> Result<DatFile, DatError> {
        let file = fs::File::open(path).map_err(|e| DatError::io(path, e))?;
        let dat: DatFile = serde_json::from_reader(BufReader::new(file))?;
        log::debug!(
            "Parsed {:?}: {} civs, {} techs, {} effects",
            path,
            dat.civs.len(),
            dat.techs.len(),
            dat.effects.len()
        );
        Ok(dat)
    }

    fn save(&self, dat: &DatFile, path: &Path) -> Result<(), DatError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DatError::io(parent, e))?;
        }
        let file = fs::File::create(path).map_err(|e| DatError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, dat)?;
        } else {
            serde_json::to_writer(&mut writer, dat)?;
        }
        writer.flush().map_err(|e| DatError::io(path, e))?;
        Ok(())
    }
}
