//! Type-safe identifiers for dat records.
//!
//! The dat format stores every foreign key as a bare `i16` with `-1` meaning
//! "none". These newtypes keep unit ids, tech ids and class ids from being
//! mixed up at API boundaries; the model structs keep the raw integers so the
//! object graph matches what the codec reads and writes.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! dat_id {
    ($(#[$meta:meta])* $name:ident($repr:ty)) => {
        $(#[$meta])*
        #[derive(
            Hash, Eq, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(pub $repr);

        impl $name {
            /// Raw value as stored in the dat file.
            #[inline]
            pub const fn raw(self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dat_id!(
    /// Index into every civ's unit slot list.
    UnitId(i16)
);
dat_id!(
    /// Index into [`crate::DatFile::techs`].
    TechId(i16)
);
dat_id!(
    /// Index into [`crate::DatFile::effects`].
    EffectId(i16)
);
dat_id!(
    /// Index into [`crate::DatFile::civs`]. Civ 0 is GAIA.
    CivId(u8)
);
dat_id!(
    /// Unit class (`Unit::class`), the grouping effect commands target via operand `b`.
    UnitClass(i16)
);
dat_id!(
    /// Damage class shared by attack and armor entries.
    ArmorClass(i16)
);
dat_id!(
    /// Resource type id: an index into `Civ::resources`.
    ResourceId(i16)
);
dat_id!(
    /// Unit attribute touched by attribute-modifier commands (operand `c`).
    AttributeId(i16)
);

impl UnitId {
    /// Slot index into `Civ::units`, or `None` for negative ids.
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl TechId {
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl EffectId {
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl CivId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ResourceId {
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}
