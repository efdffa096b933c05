//! Virtual categories for items and monsters that are interchangeable for
//! drop-rate purposes (e.g. the smut orcs of the Orc Chasm all share one
//! drop table).

static ITEM_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "morningwood plank" => "(smut orc plank)",
    "raging hardwood plank" => "(smut orc plank)",
    "weirdwood plank" => "(smut orc plank)",
    "long hard screw" => "(smut orc fastener)",
    "messy butt joint" => "(smut orc fastener)",
    "thick caulk" => "(smut orc fastener)",
    "backwoods screwdriver" => "(smut orc consumable)",
    "orcish hand lotion" => "(smut orc consumable)",
    "orcish nailing lube" => "(smut orc consumable)",
    "orcish rubber" => "(smut orc consumable)",
    "freshwater pearl necklace" => "(smut orc equipment)",
    "orc wrist" => "(smut orc equipment)",
    "orcish stud-finder" => "(smut orc equipment)",
    "screwing pooch" => "(smut orc equipment)",
};

static MONSTER_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "smut orc jacker" => "(normal smut orc)",
    "smut orc nailer" => "(normal smut orc)",
    "smut orc pipelayer" => "(normal smut orc)",
    "smut orc screwer" => "(normal smut orc)",
};

pub fn item_alias(name: &str) -> Option<&'static str> {
    ITEM_ALIASES.get(name).copied()
}

pub fn monster_alias(name: &str) -> Option<&'static str> {
    MONSTER_ALIASES.get(name).copied()
}
