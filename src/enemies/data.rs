//! Static enemy and boss templates.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub sprite: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u64,
    pub gold: u64,
}

/// What a boss ability does when it fires instead of a plain hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityKind {
    /// Damage `base + rand(0..=spread)`, not reduced by defense.
    Strike { base: u32, spread: u32 },
    /// Heals the boss by `base + rand(0..=spread)`, capped at its max hp.
    Mend { base: u32, spread: u32 },
    /// Multiplies the boss's attack, capped at a multiple of its base attack.
    Enrage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossAbility {
    pub name: &'static str,
    pub kind: AbilityKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossTemplate {
    pub stats: EnemyTemplate,
    pub required_level: u32,
    pub abilities: &'static [BossAbility],
}

/// Regular enemies, weakest first. The generator walks up this list as the
/// character levels.
pub const ENEMY_TEMPLATES: &[EnemyTemplate] = &[
    EnemyTemplate {
        name: "Slime",
        sprite: "🟢",
        hp: 50,
        attack: 8,
        defense: 0,
        experience: 20,
        gold: 8,
    },
    EnemyTemplate {
        name: "Goblin",
        sprite: "👺",
        hp: 80,
        attack: 12,
        defense: 2,
        experience: 35,
        gold: 12,
    },
    EnemyTemplate {
        name: "Skeleton Warrior",
        sprite: "💀",
        hp: 120,
        attack: 15,
        defense: 4,
        experience: 50,
        gold: 18,
    },
    EnemyTemplate {
        name: "Orc",
        sprite: "👹",
        hp: 180,
        attack: 20,
        defense: 6,
        experience: 75,
        gold: 25,
    },
    EnemyTemplate {
        name: "Troll",
        sprite: "🧌",
        hp: 250,
        attack: 25,
        defense: 10,
        experience: 100,
        gold: 35,
    },
];

const VENOM_SPRAY: BossAbility = BossAbility {
    name: "Venom Spray",
    kind: AbilityKind::Strike { base: 25, spread: 14 },
};
const WAR_CRY: BossAbility = BossAbility {
    name: "War Cry",
    kind: AbilityKind::Enrage,
};
const HEAVY_BLOW: BossAbility = BossAbility {
    name: "Heavy Blow",
    kind: AbilityKind::Strike { base: 40, spread: 14 },
};
const DEATH_GAZE: BossAbility = BossAbility {
    name: "Death Gaze",
    kind: AbilityKind::Strike { base: 50, spread: 19 },
};
const BONE_SPEAR: BossAbility = BossAbility {
    name: "Bone Spear",
    kind: AbilityKind::Strike { base: 35, spread: 9 },
};
const FRENZY: BossAbility = BossAbility {
    name: "Frenzy",
    kind: AbilityKind::Enrage,
};
const EARTHQUAKE: BossAbility = BossAbility {
    name: "Earthquake",
    kind: AbilityKind::Strike { base: 60, spread: 19 },
};
const REGENERATE: BossAbility = BossAbility {
    name: "Regenerate",
    kind: AbilityKind::Mend { base: 80, spread: 39 },
};
const BOULDER_TOSS: BossAbility = BossAbility {
    name: "Boulder Toss",
    kind: AbilityKind::Strike { base: 70, spread: 19 },
};

/// Bosses in encounter order. Stats are fixed, not level-scaled.
pub const BOSS_TEMPLATES: &[BossTemplate] = &[
    BossTemplate {
        stats: EnemyTemplate {
            name: "Slime King",
            sprite: "👑",
            hp: 300,
            attack: 35,
            defense: 10,
            experience: 200,
            gold: 100,
        },
        required_level: 5,
        abilities: &[VENOM_SPRAY],
    },
    BossTemplate {
        stats: EnemyTemplate {
            name: "Goblin Chieftain",
            sprite: "🗿",
            hp: 500,
            attack: 50,
            defense: 15,
            experience: 350,
            gold: 150,
        },
        required_level: 10,
        abilities: &[WAR_CRY, HEAVY_BLOW],
    },
    BossTemplate {
        stats: EnemyTemplate {
            name: "Skeleton Lord",
            sprite: "☠️",
            hp: 750,
            attack: 65,
            defense: 8,
            experience: 500,
            gold: 200,
        },
        required_level: 15,
        abilities: &[DEATH_GAZE, BONE_SPEAR],
    },
    BossTemplate {
        stats: EnemyTemplate {
            name: "Orc Warlord",
            sprite: "👹",
            hp: 1000,
            attack: 80,
            defense: 20,
            experience: 750,
            gold: 300,
        },
        required_level: 20,
        abilities: &[FRENZY, EARTHQUAKE],
    },
    BossTemplate {
        stats: EnemyTemplate {
            name: "Ancient Troll",
            sprite: "🧌",
            hp: 1500,
            attack: 100,
            defense: 25,
            experience: 1200,
            gold: 400,
        },
        required_level: 25,
        abilities: &[REGENERATE, BOULDER_TOSS],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_get_stronger() {
        for pair in ENEMY_TEMPLATES.windows(2) {
            assert!(pair[1].hp > pair[0].hp);
            assert!(pair[1].experience > pair[0].experience);
        }
        for pair in BOSS_TEMPLATES.windows(2) {
            assert!(pair[1].stats.hp > pair[0].stats.hp);
            assert!(pair[1].required_level > pair[0].required_level);
        }
    }

    #[test]
    fn test_every_boss_has_an_ability() {
        assert!(BOSS_TEMPLATES.iter().all(|b| !b.abilities.is_empty()));
    }
}
