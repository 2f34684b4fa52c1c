//! Builders for small dat files used in tests.

use aoe2data::{
    AttackOrArmor, Civ, Creatable, DatFile, Effect, EffectCommand, ResourceCost, Tech, Type50,
    Unit, UnitClass,
};
use aoe2data::constants::armor_classes;

pub struct DatFileBuilder {
    civ_count: usize,
    units: Vec<Unit>,
    techs: Vec<(usize, Tech)>,
    effects: Vec<(usize, Effect)>,
}

impl DatFileBuilder {
    pub fn new() -> Self {
        Self {
            civ_count: 2,
            units: Vec::new(),
            techs: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Number of civs including GAIA.
    pub fn civs(mut self, count: usize) -> Self {
        self.civ_count = count;
        self
    }

    /// A trainable unit with a melee attack, present in every civ.
    pub fn unit(self, id: i16, name: &str, class: UnitClass) -> Self {
        self.with_unit(Unit {
            id,
            base_id: id,
            copy_id: id,
            name: name.to_string(),
            class: class.0,
            hit_points: 100,
            speed: 1.0,
            combat: Some(Type50 {
                attacks: vec![AttackOrArmor::new(armor_classes::MELEE, 6)],
                armours: vec![
                    AttackOrArmor::new(armor_classes::MELEE, 0),
                    AttackOrArmor::new(armor_classes::PIERCE, 0),
                ],
                displayed_attack: 6,
                displayed_melee_armour: 0,
            }),
            creatable: Some(Creatable {
                resource_costs: [ResourceCost::EMPTY; 3],
                train_time: 30,
                train_location_id: -1,
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    /// Add `unit` to every civ in the slot given by its `id`.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn tech(mut self, id: usize, tech: Tech) -> Self {
        self.techs.push((id, tech));
        self
    }

    pub fn effect(mut self, id: usize, name: &str, commands: Vec<EffectCommand>) -> Self {
        self.effects.push((
            id,
            Effect {
                name: name.to_string(),
                effect_commands: commands,
            },
        ));
        self
    }

    pub fn build(self) -> DatFile {
        let slot_count = self
            .units
            .iter()
            .map(|u| u.id.max(0) as usize + 1)
            .max()
            .unwrap_or(0);
        let mut slots: Vec<Option<Unit>> = vec![None; slot_count];
        for unit in self.units {
            let index = unit.id.max(0) as usize;
            slots[index] = Some(unit);
        }

        let civs = (0..self.civ_count)
            .map(|i| Civ {
                name: if i == 0 {
                    "Gaia".to_string()
                } else {
                    format!("Civ {}", i)
                },
                resources: vec![200.0, 200.0, 100.0, 0.0],
                units: slots.clone(),
            })
            .collect();

        DatFile {
            version: "VER 8.8".to_string(),
            civs,
            techs: place(self.techs),
            effects: place(self.effects),
        }
    }
}

impl Default for DatFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay `(index, item)` pairs into a dense vector, filling gaps with defaults.
fn place<T: Default + Clone>(items: Vec<(usize, T)>) -> Vec<T> {
    let len = items.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
    let mut out = vec![T::default(); len];
    for (index, item) in items {
        out[index] = item;
    }
    out
}
