//! Well-known ids from the Definitive Edition dat file.
//!
//! Only the ids the bundled scripts and tests touch are listed. Variant lists
//! (`TOWN_CENTER_ALL`, `HOUSE_ALL`, ...) cover every unit slot that plays the
//! same role, e.g. the town center's construction and age-up placeholders.

pub mod resources {
    use crate::ids::ResourceId;

    /// Sentinel used in empty cost slots.
    pub const NULL: ResourceId = ResourceId(-1);
    pub const FOOD: ResourceId = ResourceId(0);
    pub const WOOD: ResourceId = ResourceId(1);
    pub const STONE: ResourceId = ResourceId(2);
    pub const GOLD: ResourceId = ResourceId(3);
    pub const POPULATION_HEADROOM: ResourceId = ResourceId(4);
    pub const CURRENT_POPULATION: ResourceId = ResourceId(11);
    pub const TOTAL_UNITS_OWNED: ResourceId = ResourceId(40);
    pub const MERCENARY_KIPCHAK_COUNT: ResourceId = ResourceId(234);

    /// The four spendable stockpiles in cost-input order.
    pub const STOCKPILES: [ResourceId; 4] = [FOOD, WOOD, STONE, GOLD];
}

/// Storage mode bits for `ResourceStorage::flag`.
pub mod storage_flags {
    /// Granted when the unit is created and kept after it dies.
    pub const KEEP: u8 = 1;
    /// Granted when the unit is created, given back when it dies.
    pub const RETURN_ON_DEATH: u8 = 2;
    /// Granted on completion and reset when the building is lost.
    pub const RESET_ON_DEATH: u8 = 4;
    /// Granted once construction completes and kept afterwards.
    pub const ON_COMPLETION: u8 = 8;
    pub const MERCENARY_LIMIT: u8 = 64;
}

pub mod civilizations {
    use crate::ids::CivId;

    pub const GAIA: CivId = CivId(0);
    pub const BRITONS: CivId = CivId(1);
    pub const FRANKS: CivId = CivId(2);
    pub const GOTHS: CivId = CivId(3);
    pub const TEUTONS: CivId = CivId(4);
    pub const JAPANESE: CivId = CivId(5);
    pub const CHINESE: CivId = CivId(6);
    pub const BYZANTINES: CivId = CivId(7);
    pub const PERSIANS: CivId = CivId(8);
    pub const SARACENS: CivId = CivId(9);
    pub const TURKS: CivId = CivId(10);
    pub const VIKINGS: CivId = CivId(11);
    pub const MONGOLS: CivId = CivId(12);
    pub const CELTS: CivId = CivId(13);
    pub const SPANISH: CivId = CivId(14);
    pub const AZTECS: CivId = CivId(15);
    pub const MAYANS: CivId = CivId(16);
    pub const HUNS: CivId = CivId(17);
    pub const KOREANS: CivId = CivId(18);
    pub const ITALIANS: CivId = CivId(19);
    pub const HINDUSTANIS: CivId = CivId(20);
    pub const INCAS: CivId = CivId(21);
    pub const MAGYARS: CivId = CivId(22);
    pub const SLAVS: CivId = CivId(23);
    pub const PORTUGUESE: CivId = CivId(24);
    pub const ETHIOPIANS: CivId = CivId(25);
    pub const MALIANS: CivId = CivId(26);
    pub const BERBERS: CivId = CivId(27);
    pub const KHMER: CivId = CivId(28);
    pub const MALAY: CivId = CivId(29);
    pub const BURMESE: CivId = CivId(30);
    pub const VIETNAMESE: CivId = CivId(31);
    pub const BULGARIANS: CivId = CivId(32);
    pub const TATARS: CivId = CivId(33);
    pub const CUMANS: CivId = CivId(34);
    pub const LITHUANIANS: CivId = CivId(35);
    pub const BURGUNDIANS: CivId = CivId(36);
    pub const SICILIANS: CivId = CivId(37);
    pub const POLES: CivId = CivId(38);
    pub const BOHEMIANS: CivId = CivId(39);
    pub const DRAVIDIANS: CivId = CivId(40);
    pub const BENGALIS: CivId = CivId(41);
    pub const GURJARAS: CivId = CivId(42);
    pub const ROMANS: CivId = CivId(43);
    pub const ARMENIANS: CivId = CivId(44);
    pub const GEORGIANS: CivId = CivId(45);
}

pub mod units {
    use crate::ids::UnitId;

    pub const HAND_CANNONEER: UnitId = UnitId(5);
    pub const ELITE_SKIRMISHER: UnitId = UnitId(6);
    pub const SKIRMISHER: UnitId = UnitId(7);
    pub const BOMBARD_CANNON: UnitId = UnitId(36);
    pub const KNIGHT: UnitId = UnitId(38);
    pub const MILL: UnitId = UnitId(68);
    pub const HOUSE: UnitId = UnitId(70);
    pub const CASTLE: UnitId = UnitId(82);
    pub const MARKET: UnitId = UnitId(84);
    pub const SPEARMAN: UnitId = UnitId(93);
    pub const TOWN_CENTER: UnitId = UnitId(109);
    pub const SLINGER: UnitId = UnitId(185);
    pub const WAR_ELEPHANT: UnitId = UnitId(239);
    pub const WONDER: UnitId = UnitId(276);
    pub const CAVALIER: UnitId = UnitId(283);
    pub const PIKEMAN: UnitId = UnitId(358);
    pub const HALBERDIER: UnitId = UnitId(359);
    pub const ELITE_WAR_ELEPHANT: UnitId = UnitId(558);
    pub const LUMBER_CAMP: UnitId = UnitId(562);
    pub const PALADIN: UnitId = UnitId(569);
    pub const MINING_CAMP: UnitId = UnitId(584);
    pub const MISSIONARY: UnitId = UnitId(775);
    pub const WAR_WAGON: UnitId = UnitId(827);
    pub const ELITE_WAR_WAGON: UnitId = UnitId(829);
    pub const CONDOTTIERO: UnitId = UnitId(882);
    pub const HEAVY_PIKEMAN: UnitId = UnitId(892);
    pub const SIEGE_TOWER: UnitId = UnitId(1105);
    pub const IMPERIAL_SKIRMISHER: UnitId = UnitId(1155);
    pub const KREPOST: UnitId = UnitId(1251);
    pub const COUSTILLIER: UnitId = UnitId(1655);
    pub const ELITE_COUSTILLIER: UnitId = UnitId(1657);
    pub const DONJON: UnitId = UnitId(1665);
    pub const HOUFNICE: UnitId = UnitId(1709);
    pub const SPEARMAN_DONJON: UnitId = UnitId(1786);
    pub const PIKEMAN_DONJON: UnitId = UnitId(1787);
    pub const HALBERDIER_DONJON: UnitId = UnitId(1788);
    pub const WARRIOR_PRIEST: UnitId = UnitId(1811);
    pub const SAVAR: UnitId = UnitId(1813);

    pub const TOWN_CENTER_ALL: [UnitId; 5] = [
        TOWN_CENTER,
        UnitId(71),
        UnitId(141),
        UnitId(142),
        UnitId(444),
    ];
    pub const MARKET_ALL: [UnitId; 3] = [MARKET, UnitId(116), UnitId(137)];
    pub const HOUSE_ALL: [UnitId; 6] = [
        HOUSE,
        UnitId(191),
        UnitId(192),
        UnitId(463),
        UnitId(464),
        UnitId(465),
    ];
}

pub mod unit_classes {
    use crate::ids::UnitClass;

    pub const ARCHER: UnitClass = UnitClass(0);
    pub const TRADE_BOAT: UnitClass = UnitClass(2);
    pub const BUILDING: UnitClass = UnitClass(3);
    pub const CIVILIAN: UnitClass = UnitClass(4);
    pub const INFANTRY: UnitClass = UnitClass(6);
    pub const CAVALRY: UnitClass = UnitClass(12);
    pub const SIEGE_WEAPON: UnitClass = UnitClass(13);
    pub const MONK: UnitClass = UnitClass(18);
    pub const TRADE_CART: UnitClass = UnitClass(19);
    pub const WALL: UnitClass = UnitClass(27);
    pub const CAVALRY_ARCHER: UnitClass = UnitClass(36);
    pub const MONK_WITH_RELIC: UnitClass = UnitClass(43);
    pub const TOWER: UnitClass = UnitClass(52);
}

pub mod armor_classes {
    use crate::ids::ArmorClass;

    pub const INFANTRY: ArmorClass = ArmorClass(1);
    pub const PIERCE: ArmorClass = ArmorClass(3);
    pub const MELEE: ArmorClass = ArmorClass(4);
    pub const CAVALRY: ArmorClass = ArmorClass(8);
    /// Unused by the base game; the bundled scripts repurpose it as a villager class.
    pub const UNUSED_10: ArmorClass = ArmorClass(10);
    pub const ARCHERS: ArmorClass = ArmorClass(15);
    pub const SIEGE_WEAPON: ArmorClass = ArmorClass(20);
}

pub mod attributes {
    use crate::ids::AttributeId;

    pub const HIT_POINTS: AttributeId = AttributeId(0);
    pub const LINE_OF_SIGHT: AttributeId = AttributeId(1);
    pub const MOVEMENT_SPEED: AttributeId = AttributeId(5);
    pub const ARMOR: AttributeId = AttributeId(8);
    pub const ATTACK: AttributeId = AttributeId(9);
    pub const ATTACK_RELOAD_TIME: AttributeId = AttributeId(10);
    pub const TRAIN_TIME: AttributeId = AttributeId(101);
}

/// Raw effect command type codes as stored in `EffectCommand::type_`.
pub mod command_types {
    pub const ATTRIBUTE_MODIFIER_SET: u8 = 0;
    pub const RESOURCE_MODIFIER: u8 = 1;
    pub const ENABLE_DISABLE_UNIT: u8 = 2;
    pub const UPGRADE_UNIT: u8 = 3;
    pub const ATTRIBUTE_MODIFIER_ADDITIVE: u8 = 4;
    pub const ATTRIBUTE_MODIFIER_MULTIPLY: u8 = 5;
    pub const RESOURCE_MODIFIER_MULTIPLY: u8 = 6;
    pub const SPAWN_UNIT: u8 = 7;
    pub const TEAM_ATTRIBUTE_MODIFIER_SET: u8 = 10;
    pub const TEAM_ATTRIBUTE_MODIFIER_ADDITIVE: u8 = 14;
    pub const ENEMY_ATTRIBUTE_MODIFIER_ADDITIVE: u8 = 24;
    pub const TECH_COST_MODIFIER: u8 = 101;
    pub const DISABLE_TECH: u8 = 102;
    pub const TECH_TIME_MODIFIER: u8 = 103;
}

pub mod techs {
    use crate::ids::TechId;

    pub const LOOM: TechId = TechId(22);
    pub const FEUDAL_AGE: TechId = TechId(101);
    pub const CASTLE_AGE: TechId = TechId(102);
    pub const IMPERIAL_AGE: TechId = TechId(103);
    pub const WHEELBARROW: TechId = TechId(213);
    pub const CORVINIAN_ARMY: TechId = TechId(514);
    pub const HULCHE_JAVELINEERS: TechId = TechId(516);
    pub const ARSON: TechId = TechId(602);
}
