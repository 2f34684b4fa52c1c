//! Bundled mod scripts.
//!
//! Each script is a plain function over the loaded [`aoe2data::DatFile`].
//! They double as worked examples of the editor API, one technique per
//! helper function.

pub mod age_diplomacy;
pub mod custom;
pub mod tech_examples;
pub mod unit_examples;

pub use age_diplomacy::run_age_diplomacy;
pub use custom::run_custom_modifications;
pub use tech_examples::run_tech_examples;
pub use unit_examples::run_unit_examples;
