//! Effect command decoding and editing.
//!
//! An [`EffectCommand`] stores its operation as a bare type code. Codes below
//! 100 encode a family in the last digit (set / add / multiply an attribute,
//! enable a unit, ...) and a scope in the tens digit (own player, team,
//! enemies). [`CommandKind::decode`] turns the code into a variant once;
//! nothing downstream does arithmetic on type codes.

use aoe2data::{AttributeId, DatFile, Effect, EffectCommand, EffectId, UnitClass, UnitId};

use crate::error::EditError;

/// Who an effect command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandScope {
    Player,
    Team,
    Enemy,
    /// Tens digit with no known meaning; kept so the code round-trips.
    Other(ScopeDigit),
}

/// A tens digit of a command code outside the known scopes, `3..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeDigit(u8);

impl ScopeDigit {
    pub const fn new(tens: u8) -> Option<Self> {
        if tens >= 3 && tens <= 9 {
            Some(Self(tens))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl CommandScope {
    /// `tens` is at most 9 for codes below 100.
    fn from_tens(tens: u8) -> Self {
        match tens {
            0 => CommandScope::Player,
            1 => CommandScope::Team,
            2 => CommandScope::Enemy,
            other => ScopeDigit::new(other).map_or(CommandScope::Player, CommandScope::Other),
        }
    }

    fn tens(self) -> u8 {
        match self {
            CommandScope::Player => 0,
            CommandScope::Team => 1,
            CommandScope::Enemy => 2,
            CommandScope::Other(digit) => digit.get(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOp {
    Set,
    Add,
    Multiply,
}

/// Decoded effect command type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `a` unit id or -1, `b` unit class or -1, `c` attribute, `d` value.
    Attribute { op: AttributeOp, scope: CommandScope },
    /// `a` resource, `b` mode, `d` amount.
    Resource { multiply: bool, scope: CommandScope },
    /// `a` unit id, `b` 1 to enable / 0 to disable.
    EnableDisableUnit { scope: CommandScope },
    /// `a` source unit id, `b` target unit id.
    UpgradeUnit { scope: CommandScope },
    SpawnUnit { scope: CommandScope },
    TechCostModifier,
    DisableTech,
    TechTimeModifier,
    Unknown(u8),
}

impl CommandKind {
    pub fn decode(code: u8) -> Self {
        match code {
            101 => return CommandKind::TechCostModifier,
            102 => return CommandKind::DisableTech,
            103 => return CommandKind::TechTimeModifier,
            100.. => return CommandKind::Unknown(code),
            _ => {}
        }
        let scope = CommandScope::from_tens(code / 10);
        match code % 10 {
            0 => CommandKind::Attribute {
                op: AttributeOp::Set,
                scope,
            },
            1 => CommandKind::Resource {
                multiply: false,
                scope,
            },
            2 => CommandKind::EnableDisableUnit { scope },
            3 => CommandKind::UpgradeUnit { scope },
            4 => CommandKind::Attribute {
                op: AttributeOp::Add,
                scope,
            },
            5 => CommandKind::Attribute {
                op: AttributeOp::Multiply,
                scope,
            },
            6 => CommandKind::Resource {
                multiply: true,
                scope,
            },
            7 => CommandKind::SpawnUnit { scope },
            _ => CommandKind::Unknown(code),
        }
    }

    /// Type code for this kind. Inverse of [`CommandKind::decode`].
    pub fn code(self) -> u8 {
        let (family, scope) = match self {
            CommandKind::Attribute { op, scope } => (
                match op {
                    AttributeOp::Set => 0,
                    AttributeOp::Add => 4,
                    AttributeOp::Multiply => 5,
                },
                scope,
            ),
            CommandKind::Resource { multiply, scope } => (if multiply { 6 } else { 1 }, scope),
            CommandKind::EnableDisableUnit { scope } => (2, scope),
            CommandKind::UpgradeUnit { scope } => (3, scope),
            CommandKind::SpawnUnit { scope } => (7, scope),
            CommandKind::TechCostModifier => return 101,
            CommandKind::DisableTech => return 102,
            CommandKind::TechTimeModifier => return 103,
            CommandKind::Unknown(code) => return code,
        };
        scope.tens() * 10 + family
    }

    pub fn is_attribute_modifier(self) -> bool {
        matches!(self, CommandKind::Attribute { .. })
    }

    /// Kinds whose `a` operand names the unit the command acts on.
    pub fn has_unit_operand(self) -> bool {
        matches!(
            self,
            CommandKind::Attribute { .. } | CommandKind::EnableDisableUnit { .. }
        )
    }
}

/// Unit-or-class targeting of a command.
///
/// The engine accepts both forms and shipped data uses both, so matching must
/// check each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandTarget {
    pub unit: Option<UnitId>,
    pub class: Option<UnitClass>,
}

impl CommandTarget {
    pub fn unit(unit: UnitId) -> Self {
        Self {
            unit: Some(unit),
            class: None,
        }
    }

    pub fn class(class: UnitClass) -> Self {
        Self {
            unit: None,
            class: Some(class),
        }
    }

    fn from_operands(a: i16, b: i16) -> Self {
        Self {
            unit: (a >= 0).then_some(UnitId(a)),
            class: (b >= 0).then_some(UnitClass(b)),
        }
    }

    fn operands(self) -> (i16, i16) {
        (
            self.unit.map_or(-1, |u| u.0),
            self.class.map_or(-1, |c| c.0),
        )
    }
}

/// A raw command with its kind decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    pub raw: EffectCommand,
}

impl Command {
    pub fn decode(raw: EffectCommand) -> Self {
        Self {
            kind: CommandKind::decode(raw.type_),
            raw,
        }
    }

    /// Unit/class targeting for commands with a unit operand.
    pub fn target(&self) -> Option<CommandTarget> {
        match self.kind {
            CommandKind::Attribute { .. } => {
                Some(CommandTarget::from_operands(self.raw.a, self.raw.b))
            }
            CommandKind::EnableDisableUnit { .. } => {
                Some(CommandTarget::from_operands(self.raw.a, -1))
            }
            _ => None,
        }
    }

    /// The specific unit this command names, if any.
    pub fn unit_operand(&self) -> Option<UnitId> {
        (self.kind.has_unit_operand() && self.raw.a >= 0).then_some(UnitId(self.raw.a))
    }

    pub fn attribute(&self) -> Option<AttributeId> {
        self.kind
            .is_attribute_modifier()
            .then_some(AttributeId(self.raw.c))
    }

    /// Copy of the raw command acting on `unit` instead.
    pub fn with_unit_operand(&self, unit: UnitId) -> EffectCommand {
        EffectCommand {
            a: unit.0,
            ..self.raw
        }
    }
}

/// Build an attribute-modifier command.
pub fn attribute_command(
    op: AttributeOp,
    scope: CommandScope,
    target: CommandTarget,
    attribute: AttributeId,
    value: f32,
) -> EffectCommand {
    let (a, b) = target.operands();
    EffectCommand::new(
        CommandKind::Attribute { op, scope }.code(),
        a,
        b,
        attribute.0,
        value,
    )
}

/// Build an enable (or disable) command for one unit.
pub fn enable_unit_command(unit: UnitId, enable: bool) -> EffectCommand {
    EffectCommand::new(
        CommandKind::EnableDisableUnit {
            scope: CommandScope::Player,
        }
        .code(),
        unit.0,
        enable as i16,
        -1,
        0.0,
    )
}

/// Pack a bonus-damage payload into an attack/armor command's `d` operand:
/// the amount as a signed byte in the low 8 bits, the damage class above it.
pub fn encode_amount_type(amount: i16, class: aoe2data::ArmorClass) -> f32 {
    let low = amount as u8 as u16;
    let high = class.0 as u8 as u16;
    ((high << 8) | low) as f32
}

/// Inverse of [`encode_amount_type`].
pub fn decode_amount_type(d: f32) -> (i16, aoe2data::ArmorClass) {
    let packed = d as i32;
    let amount = (packed & 0xFF) as u8 as i8 as i16;
    let class = ((packed >> 8) & 0xFF) as i16;
    (amount, aoe2data::ArmorClass(class))
}

pub fn append_command(
    dat: &mut DatFile,
    effect: EffectId,
    command: EffectCommand,
) -> Result<(), EditError> {
    dat.effect_mut(effect)?.effect_commands.push(command);
    Ok(())
}

/// Indices and decoded form of every command matching `pred`.
pub fn find_commands<'a, P>(effect: &'a Effect, mut pred: P) -> impl Iterator<Item = (usize, Command)> + 'a
where
    P: FnMut(&Command) -> bool + 'a,
{
    effect
        .effect_commands
        .iter()
        .map(|raw| Command::decode(*raw))
        .enumerate()
        .filter(move |(_, cmd)| pred(cmd))
}

/// Remove every command matching `pred`, keeping the rest in order.
/// Returns how many were removed.
pub fn remove_commands<P>(effect: &mut Effect, mut pred: P) -> usize
where
    P: FnMut(&Command) -> bool,
{
    let before = effect.effect_commands.len();
    effect
        .effect_commands
        .retain(|raw| !pred(&Command::decode(*raw)));
    before - effect.effect_commands.len()
}

/// [`remove_commands`] over every effect in the dat.
pub fn remove_commands_everywhere<P>(dat: &mut DatFile, mut pred: P) -> usize
where
    P: FnMut(&Command) -> bool,
{
    dat.effects
        .iter_mut()
        .map(|effect| remove_commands(effect, &mut pred))
        .sum()
}

/// Deep-copy an effect and append it, returning the copy's id.
pub fn duplicate_effect(
    dat: &mut DatFile,
    effect: EffectId,
    name: Option<&str>,
) -> Result<EffectId, EditError> {
    let mut copy = dat.effect(effect)?.clone();
    if let Some(name) = name {
        copy.name = name.to_string();
    }
    Ok(dat.push_effect(copy)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoe2data::constants::{armor_classes, attributes, command_types, unit_classes};
    use proptest::prelude::*;

    #[test]
    fn test_decode_families() {
        assert_eq!(
            CommandKind::decode(command_types::ATTRIBUTE_MODIFIER_ADDITIVE),
            CommandKind::Attribute {
                op: AttributeOp::Add,
                scope: CommandScope::Player
            }
        );
        assert_eq!(
            CommandKind::decode(command_types::TEAM_ATTRIBUTE_MODIFIER_SET),
            CommandKind::Attribute {
                op: AttributeOp::Set,
                scope: CommandScope::Team
            }
        );
        assert_eq!(
            CommandKind::decode(command_types::ENEMY_ATTRIBUTE_MODIFIER_ADDITIVE),
            CommandKind::Attribute {
                op: AttributeOp::Add,
                scope: CommandScope::Enemy
            }
        );
        assert_eq!(
            CommandKind::decode(command_types::ENABLE_DISABLE_UNIT),
            CommandKind::EnableDisableUnit {
                scope: CommandScope::Player
            }
        );
        assert_eq!(
            CommandKind::decode(command_types::DISABLE_TECH),
            CommandKind::DisableTech
        );
        assert_eq!(CommandKind::decode(8), CommandKind::Unknown(8));
        assert_eq!(CommandKind::decode(150), CommandKind::Unknown(150));
    }

    #[test]
    fn test_code_roundtrips_every_byte() {
        for code in 0..=u8::MAX {
            assert_eq!(CommandKind::decode(code).code(), code);
        }
    }

    #[test]
    fn test_other_scope_digit_is_bounded() {
        assert_eq!(ScopeDigit::new(2), None);
        assert_eq!(ScopeDigit::new(10), None);
        assert_eq!(ScopeDigit::new(26), None);

        let digit = ScopeDigit::new(9).unwrap();
        let kind = CommandKind::Attribute {
            op: AttributeOp::Multiply,
            scope: CommandScope::Other(digit),
        };
        assert_eq!(kind.code(), 95);
        assert_eq!(CommandKind::decode(95), kind);
    }

    #[test]
    fn test_unit_operand_only_for_unit_commands() {
        for code in 0..=u8::MAX {
            let kind = CommandKind::decode(code);
            let cmd = Command::decode(EffectCommand::new(code, 83, -1, 0, 1.0));
            assert_eq!(cmd.unit_operand().is_some(), kind.has_unit_operand());
            assert_eq!(cmd.unit_operand(), cmd.target().and_then(|t| t.unit));
        }
        assert!(!CommandKind::decode(23).has_unit_operand());
        assert!(CommandKind::decode(12).has_unit_operand());
    }

    #[test]
    fn test_target_reads_both_forms() {
        let by_class = Command::decode(EffectCommand::new(4, -1, 36, 0, 10.0));
        assert_eq!(
            by_class.target(),
            Some(CommandTarget::class(unit_classes::CAVALRY_ARCHER))
        );
        assert_eq!(by_class.unit_operand(), None);

        let by_unit = Command::decode(EffectCommand::new(0, 39, -1, 0, 10.0));
        assert_eq!(by_unit.unit_operand(), Some(UnitId(39)));
        assert_eq!(by_unit.attribute(), Some(attributes::HIT_POINTS));

        let enable = Command::decode(enable_unit_command(UnitId(775), true));
        assert_eq!(enable.unit_operand(), Some(UnitId(775)));
        assert_eq!(enable.attribute(), None);

        let resource = Command::decode(EffectCommand::new(1, 3, 0, -1, 100.0));
        assert_eq!(resource.target(), None);
    }

    #[test]
    fn test_attribute_command_layout() {
        let cmd = attribute_command(
            AttributeOp::Add,
            CommandScope::Player,
            CommandTarget::class(unit_classes::INFANTRY),
            attributes::ATTACK,
            encode_amount_type(1, armor_classes::SIEGE_WEAPON),
        );
        assert_eq!(cmd.type_, 4);
        assert_eq!((cmd.a, cmd.b, cmd.c), (-1, 6, 9));
        assert_eq!(cmd.d, ((20 << 8) | 1) as f32);
    }

    #[test]
    fn test_amount_type_packs_signed_byte() {
        assert_eq!(encode_amount_type(-1, armor_classes::MELEE), ((4 << 8) | 0xFF) as f32);
        assert_eq!(
            decode_amount_type(encode_amount_type(-1, armor_classes::MELEE)),
            (-1, armor_classes::MELEE)
        );
        assert_eq!(
            decode_amount_type(encode_amount_type(12, armor_classes::CAVALRY)),
            (12, armor_classes::CAVALRY)
        );
    }

    #[test]
    fn test_remove_adjacent_matches() {
        // Two matches in a row: a cursor that does not step back skips the second.
        let mut effect = Effect {
            name: "Test".into(),
            effect_commands: vec![
                EffectCommand::new(0, 1, -1, 0, 1.0),
                EffectCommand::new(4, -1, 36, 0, 1.0),
                EffectCommand::new(4, -1, 36, 0, 2.0),
                EffectCommand::new(0, 2, -1, 0, 1.0),
            ],
        };

        let removed = remove_commands(&mut effect, |cmd| {
            cmd.target().and_then(|t| t.class) == Some(unit_classes::CAVALRY_ARCHER)
        });

        assert_eq!(removed, 2);
        assert_eq!(effect.effect_commands.len(), 2);
        assert_eq!(effect.effect_commands[0].a, 1);
        assert_eq!(effect.effect_commands[1].a, 2);
    }

    #[test]
    fn test_find_commands_reports_indices() {
        let effect = Effect {
            name: "Test".into(),
            effect_commands: vec![
                EffectCommand::new(1, 3, 0, -1, 100.0),
                EffectCommand::new(2, 775, 1, -1, 0.0),
            ],
        };
        let found: Vec<_> = find_commands(&effect, |cmd| cmd.unit_operand().is_some()).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, 1);
    }

    #[test]
    fn test_duplicate_effect_appends() {
        let mut dat = DatFile {
            effects: vec![Effect {
                name: "Arson".into(),
                effect_commands: vec![EffectCommand::new(4, -1, 6, 9, 1.0)],
            }],
            ..Default::default()
        };
        let id = duplicate_effect(&mut dat, EffectId(0), Some("Arson copy")).unwrap();
        assert_eq!(id, EffectId(1));
        assert_eq!(dat.effects[1].name, "Arson copy");
        assert_eq!(dat.effects[1].effect_commands, dat.effects[0].effect_commands);

        append_command(&mut dat, id, enable_unit_command(UnitId(5), false)).unwrap();
        assert_eq!(dat.effects[0].effect_commands.len(), 1);
        assert_eq!(dat.effects[1].effect_commands.len(), 2);
    }

    #[test]
    fn test_append_to_unknown_effect() {
        let mut dat = DatFile::default();
        assert!(append_command(&mut dat, EffectId(3), enable_unit_command(UnitId(5), true)).is_err());
    }

    proptest! {
        #[test]
        fn prop_removal_keeps_non_matching_in_order(
            types in prop::collection::vec(0u8..30, 0..40)
        ) {
            let commands: Vec<EffectCommand> = types
                .iter()
                .enumerate()
                .map(|(i, &t)| EffectCommand::new(t, i as i16, -1, 0, 0.0))
                .collect();
            let is_match = |c: &EffectCommand| Command::decode(*c).kind.is_attribute_modifier();
            let expected: Vec<EffectCommand> =
                commands.iter().copied().filter(|c| !is_match(c)).collect();
            let matching = commands.len() - expected.len();

            let mut effect = Effect { name: String::new(), effect_commands: commands };
            let removed = remove_commands(&mut effect, |cmd| cmd.kind.is_attribute_modifier());

            prop_assert_eq!(removed, matching);
            prop_assert_eq!(effect.effect_commands, expected);
        }
    }
}
