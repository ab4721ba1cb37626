//! Compiled-in catalogues: herbs, quality tiers, pill recipes, and the
//! random event table.
//!
//! The herb and recipe ids are part of the client contract. The order of
//! [`EVENT_TABLE`] is part of the engine contract: the selection scan stops
//! at the first kind that fires, so earlier rows win.

use xiuxian_types::{
    EventKind, HerbCategory, HerbConfig, HerbQuality, PillGrade, PillRecipe, QualityTier,
};

/// A row of the random event table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventEntry {
    /// Which event.
    pub kind: EventKind,
    /// Chinese display name, used as the description prefix.
    pub name: &'static str,
    /// Probability that this row fires when the scan reaches it.
    pub chance: f64,
}

/// The ten random events in scan order.
pub static EVENT_TABLE: [EventEntry; 10] = [
    EventEntry { kind: EventKind::AncientTablet, name: "古老石碑", chance: 0.08 },
    EventEntry { kind: EventKind::SpiritSpring, name: "灵泉涌现", chance: 0.12 },
    EventEntry { kind: EventKind::AncientMaster, name: "上古大能", chance: 0.03 },
    EventEntry { kind: EventKind::MonsterAttack, name: "妖兽袭击", chance: 0.15 },
    EventEntry { kind: EventKind::CultivationDeviation, name: "走火入魔", chance: 0.12 },
    EventEntry { kind: EventKind::TreasureTrove, name: "秘境宝藏", chance: 0.05 },
    EventEntry { kind: EventKind::Enlightenment, name: "顿悟", chance: 0.08 },
    EventEntry { kind: EventKind::QiDeviation, name: "真气逆流", chance: 0.15 },
    EventEntry { kind: EventKind::HerbDiscovery, name: "灵草发现", chance: 0.10 },
    EventEntry { kind: EventKind::PillRecipeFragment, name: "丹方残页", chance: 0.07 },
];

/// The five quality tiers, coarse to fine.
pub static QUALITY_TIERS: [QualityTier; 5] = [
    QualityTier { quality: HerbQuality::Common, name: "普通", multiplier: 1.0 },
    QualityTier { quality: HerbQuality::Uncommon, name: "优质", multiplier: 1.5 },
    QualityTier { quality: HerbQuality::Rare, name: "稀有", multiplier: 2.0 },
    QualityTier { quality: HerbQuality::Epic, name: "极品", multiplier: 3.0 },
    QualityTier { quality: HerbQuality::Legendary, name: "仙品", multiplier: 5.0 },
];

/// The fifteen herbs.
pub static HERBS: [HerbConfig; 15] = [
    HerbConfig {
        id: "spirit_grass",
        name: "灵精草",
        description: "最常见的灵草，蕴含少量灵气",
        base_value: 10,
        category: HerbCategory::Spirit,
        chance: 0.25,
    },
    HerbConfig {
        id: "cloud_flower",
        name: "云雾花",
        description: "生长在云雾缭绕处的灵花，有助于修炼",
        base_value: 15,
        category: HerbCategory::Cultivation,
        chance: 0.25,
    },
    HerbConfig {
        id: "thunder_root",
        name: "雷击根",
        description: "经过雷霆淬炼的灵根，蕴含强大能量",
        base_value: 25,
        category: HerbCategory::Attribute,
        chance: 0.15,
    },
    HerbConfig {
        id: "dragon_breath_herb",
        name: "龙息草",
        description: "吸收龙气孕育的灵草，极为珍贵",
        base_value: 40,
        category: HerbCategory::Special,
        chance: 0.05,
    },
    HerbConfig {
        id: "immortal_jade_grass",
        name: "仙玉草",
        description: "传说中生长在仙境的灵草，可遇不可求",
        base_value: 60,
        category: HerbCategory::Special,
        chance: 0.02,
    },
    HerbConfig {
        id: "dark_yin_grass",
        name: "玄阴草",
        description: "生长在阴暗处的奇特灵草，具有独特的灵气属性",
        base_value: 30,
        category: HerbCategory::Spirit,
        chance: 0.1,
    },
    HerbConfig {
        id: "nine_leaf_lingzhi",
        name: "九叶灵芝",
        description: "传说中的灵芝，拥有九片叶子，蕴含强大的生命力",
        base_value: 45,
        category: HerbCategory::Cultivation,
        chance: 0.05,
    },
    HerbConfig {
        id: "purple_ginseng",
        name: "紫金参",
        description: "千年紫参，散发着淡淡的金光，大补元气",
        base_value: 50,
        category: HerbCategory::Attribute,
        chance: 0.05,
    },
    HerbConfig {
        id: "frost_lotus",
        name: "寒霜莲",
        description: "生长在极寒之地的莲花，可以提升修炼者的灵力纯度",
        base_value: 55,
        category: HerbCategory::Spirit,
        chance: 0.1,
    },
    HerbConfig {
        id: "fire_heart_flower",
        name: "火心花",
        description: "生长在火山口的奇花，花心似火焰跳动",
        base_value: 35,
        category: HerbCategory::Attribute,
        chance: 0.08,
    },
    HerbConfig {
        id: "moonlight_orchid",
        name: "月华兰",
        description: "只在月圆之夜绽放的神秘兰花，能吸收月华精华",
        base_value: 70,
        category: HerbCategory::Spirit,
        chance: 0.03,
    },
    HerbConfig {
        id: "sun_essence_flower",
        name: "日精花",
        description: "吸收太阳精华的奇花，蕴含纯阳之力",
        base_value: 75,
        category: HerbCategory::Cultivation,
        chance: 0.03,
    },
    HerbConfig {
        id: "five_elements_grass",
        name: "五行草",
        description: "一株草同时具备金木水火土五种属性的奇珍",
        base_value: 80,
        category: HerbCategory::Attribute,
        chance: 0.01,
    },
    HerbConfig {
        id: "phoenix_feather_herb",
        name: "凤羽草",
        description: "传说生长在不死火凤栖息地的神草，具有涅槃之力",
        base_value: 85,
        category: HerbCategory::Special,
        chance: 0.01,
    },
    HerbConfig {
        id: "celestial_dew_grass",
        name: "天露草",
        description: "凝聚天地精华的仙草，千年一遇",
        base_value: 90,
        category: HerbCategory::Special,
        chance: 0.01,
    },
];

/// The twelve pill recipes.
pub static PILL_RECIPES: [PillRecipe; 12] = [
    PillRecipe {
        id: "spirit_gathering",
        name: "聚灵丹",
        description: "十年灵草炼制，服用后恢复少量灵力",
        grade: PillGrade::Grade1,
        kind: HerbCategory::Spirit,
        fragments_needed: 10,
    },
    PillRecipe {
        id: "cultivation_boost",
        name: "聚气丹",
        description: "十年灵草炼制，服用后增加少量修为",
        grade: PillGrade::Grade2,
        kind: HerbCategory::Cultivation,
        fragments_needed: 15,
    },
    PillRecipe {
        id: "spirit_recovery",
        name: "回灵丹",
        description: "百年灵草炼制，服用后恢复大量灵力",
        grade: PillGrade::Grade2,
        kind: HerbCategory::Spirit,
        fragments_needed: 15,
    },
    PillRecipe {
        id: "thunder_power",
        name: "雷灵丹",
        description: "千年灵草炼制，蕴含狂暴的天雷能量，服用后增加攻击",
        grade: PillGrade::Grade3,
        kind: HerbCategory::Attribute,
        fragments_needed: 20,
    },
    PillRecipe {
        id: "essence_condensation",
        name: "凝元丹",
        description: "千年灵草炼制，服用后增加大量修为",
        grade: PillGrade::Grade3,
        kind: HerbCategory::Cultivation,
        fragments_needed: 20,
    },
    PillRecipe {
        id: "mind_clarity",
        name: "清心丹",
        description: "清心静气，服用后一段时间内灵力恢复加快",
        grade: PillGrade::Grade3,
        kind: HerbCategory::Spirit,
        fragments_needed: 20,
    },
    PillRecipe {
        id: "immortal_essence",
        name: "仙灵丹",
        description: "蕴含仙灵之气，服用后大幅提升灵力上限",
        grade: PillGrade::Grade4,
        kind: HerbCategory::Spirit,
        fragments_needed: 25,
    },
    PillRecipe {
        id: "fire_essence",
        name: "火元丹",
        description: "以火心花为主药，服用后增加火属性亲和",
        grade: PillGrade::Grade4,
        kind: HerbCategory::Attribute,
        fragments_needed: 25,
    },
    PillRecipe {
        id: "five_elements_pill",
        name: "五行丹",
        description: "以五行草炼制，调和五行，全面提升属性",
        grade: PillGrade::Grade5,
        kind: HerbCategory::Attribute,
        fragments_needed: 30,
    },
    PillRecipe {
        id: "celestial_essence_pill",
        name: "天元丹",
        description: "凝聚天地元气，服用后修为大进",
        grade: PillGrade::Grade6,
        kind: HerbCategory::Cultivation,
        fragments_needed: 35,
    },
    PillRecipe {
        id: "sun_moon_pill",
        name: "日月丹",
        description: "以日精花与月华兰同炼，阴阳相济",
        grade: PillGrade::Grade7,
        kind: HerbCategory::Special,
        fragments_needed: 40,
    },
    PillRecipe {
        id: "phoenix_rebirth_pill",
        name: "涅槃丹",
        description: "以凤羽草为引，传说可助修士涅槃重生",
        grade: PillGrade::Grade8,
        kind: HerbCategory::Special,
        fragments_needed: 45,
    },
];

/// The catalogues an engine draws from.
///
/// [`Catalogue::standard`] is what the server uses; tests can substitute
/// their own tables.
#[derive(Debug, Clone, Copy)]
pub struct Catalogue {
    /// Herbs, picked uniformly by herb discovery.
    pub herbs: &'static [HerbConfig],
    /// Recipes, picked uniformly by recipe fragment events.
    pub recipes: &'static [PillRecipe],
    /// Random events in scan order.
    pub events: &'static [EventEntry],
}

impl Catalogue {
    /// The compiled-in catalogues.
    pub const fn standard() -> Self {
        Self {
            herbs: &HERBS,
            recipes: &PILL_RECIPES,
            events: &EVENT_TABLE,
        }
    }

    /// Build a catalogue from custom tables.
    pub const fn new(
        herbs: &'static [HerbConfig],
        recipes: &'static [PillRecipe],
        events: &'static [EventEntry],
    ) -> Self {
        Self {
            herbs,
            recipes,
            events,
        }
    }

    /// Look up a herb by id.
    pub fn herb(&self, id: &str) -> Option<&'static HerbConfig> {
        self.herbs.iter().find(|h| h.id == id)
    }

    /// Display name of an event kind, or its snake_case id when absent.
    pub fn event_name(&self, kind: EventKind) -> &'static str {
        self.events
            .iter()
            .find(|e| e.kind == kind)
            .map_or_else(|| kind.as_str(), |e| e.name)
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::standard()
    }
}
