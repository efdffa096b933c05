use super::Encounter;
use crate::game_data::{item_alias, monster_alias};

fn append_item_aliases(bucket: &mut Vec<String>) {
    let extra: Vec<String> = bucket
        .iter()
        .filter_map(|name| item_alias(name))
        .map(str::to_string)
        .collect();
    bucket.extend(extra);
}

/// Add virtual item entries to `encounter` and, when its monster belongs to a
/// virtual category, return a copy filed under that category.
///
/// The copy owns its buckets and samples but shares the segment metadata.
pub fn synthesize_alias(encounter: &mut Encounter) -> Option<Encounter> {
    append_item_aliases(&mut encounter.kept);
    append_item_aliases(&mut encounter.stolen);
    append_item_aliases(&mut encounter.misc);

    let alias = monster_alias(encounter.monster.as_deref()?)?;
    let mut copy = encounter.clone();
    copy.title = alias.to_string();
    copy.monster = Some(alias.to_string());
    copy.is_alias = true;
    Some(copy)
}
