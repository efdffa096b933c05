//! Per-monster aggregation.
//!
//! Walks the encounter list in order, keeping a running [`MetadataContext`]
//! built from each segment's declarations, and files every combat under its
//! monster with samples normalized against that context.

mod crunch;
mod item;
mod monster;
mod summary;

#[cfg(test)]
mod analysis_tests;

pub use crunch::{InitiativeEstimate, MonsterStats, crunch, reconcile_initiative};
pub use item::Item;
pub use monster::{ItemTrials, Monster, Trial};
pub use summary::{ItemReport, MonsterReport, RangeSummary};

use std::collections::BTreeMap;

use hashbrown::HashMap;
use kolstat_types::AnalysisConfig;
use serde::Serialize;

use crate::encounter::Encounter;
use crate::state::MetadataContext;
use crate::warnings::Warnings;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    /// Combat encounters analyzed, alias copies included.
    pub combats: usize,
    /// Sorted by name.
    pub monsters: Vec<MonsterReport>,
    /// Non-combat adventures by title.
    pub noncombats: BTreeMap<String, u32>,
    pub warnings: Warnings,
}

impl Analysis {
    pub fn monster(&self, name: &str) -> Option<&MonsterReport> {
        self.monsters.iter().find(|m| m.name == name)
    }
}

pub struct Aggregator<'a> {
    config: &'a AnalysisConfig,
    context: MetadataContext,
    monsters: HashMap<String, Monster>,
    noncombats: BTreeMap<String, u32>,
    combats: usize,
    warnings: Warnings,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self {
            config,
            context: MetadataContext::neutral(),
            monsters: HashMap::new(),
            noncombats: BTreeMap::new(),
            combats: 0,
            warnings: Warnings::new(),
        }
    }

    /// Running character context after the encounters added so far.
    pub fn context(&self) -> &MetadataContext {
        &self.context
    }

    pub fn add(&mut self, index: usize, enc: &Encounter) {
        // Alias copies share their original's segment metadata.
        if !enc.is_alias {
            self.context.import_from(&enc.metadata);
        }

        if !enc.is_combat {
            if enc.has_location() {
                tracing::debug!("Skipping {}", enc);
                *self.noncombats.entry(enc.title.clone()).or_default() += 1;
            }
            return;
        }
        tracing::debug!("Analyzing {}", enc);
        self.combats += 1;

        let item_divisor = self.item_divisor(enc);
        let stat_sample = enc.won.then(|| self.stat_sample(enc));
        let meat_sample = enc.meat as f64 / self.context.meat_multiplier.unwrap_or(1.0);
        let initiative = self.context.initiative_sample();

        let name = enc.display_name();
        let monster = self
            .monsters
            .entry(name.to_string())
            .or_insert_with(|| Monster::new(name));
        monster.add_encounter(index, item_divisor, initiative, enc.got_jump);
        if let Some(stat_sample) = stat_sample {
            monster.add_win(stat_sample, meat_sample);
        }

        let inverse_rate = 1.0 / item_divisor;
        for name in &enc.kept {
            monster.item_mut(name).record_drop(inverse_rate);
        }
        for name in &enc.stolen {
            monster.item_mut(name).record_steal(enc.won);
        }
        for name in &enc.misc {
            monster.item_mut(name).record_misc();
        }
    }

    fn item_divisor(&mut self, enc: &Encounter) -> f64 {
        let divisor =
            self.context.item_multiplier.unwrap_or(1.0) + self.config.item_buff_bonus(&enc.effects);
        if divisor > 0.0 {
            divisor
        } else {
            self.warnings
                .push(format!("Ignoring non-positive item multiplier: {}", divisor));
            1.0
        }
    }

    /// Stat gain with the main-stat and stat-day bonuses divided back out and
    /// the flat +stat bonus removed.
    fn stat_sample(&mut self, enc: &Encounter) -> f64 {
        let mut multipliers = [1.0; 3];
        match self.context.main_stat {
            Some(stat) => multipliers[stat.index()] += self.config.main_stat_bonus,
            None => self.warnings.push(format!(
                "Invalid class: {} (is the session log recording player state on login?)",
                self.context.class.as_deref().unwrap_or("unknown")
            )),
        }
        if let Some(stat) = self.context.stat_day_stat
            && enc.number > self.config.stat_day_min_adventure
        {
            multipliers[stat.index()] += self.config.stat_day_bonus;
        }
        let gained: f64 = enc
            .stats
            .iter()
            .zip(multipliers)
            .map(|(&gain, multiplier)| gain as f64 / multiplier)
            .sum();
        gained - self.context.bonus_stat.unwrap_or(0.0)
    }

    pub fn finish(self, encounters: &[Encounter]) -> Analysis {
        let mut monsters: Vec<Monster> = self.monsters.into_values().collect();
        monsters.sort_by(|a, b| a.name.cmp(&b.name));
        let monsters: Vec<MonsterReport> = monsters
            .iter()
            .map(|m| MonsterReport::new(m, encounters))
            .collect();

        tracing::info!(
            combats = self.combats,
            monsters = monsters.len(),
            "Analysis complete"
        );
        Analysis {
            combats: self.combats,
            monsters,
            noncombats: self.noncombats,
            warnings: self.warnings,
        }
    }
}

/// Aggregate `encounters` (in log order) into per-monster reports.
pub fn analyze(encounters: &[Encounter], config: &AnalysisConfig) -> Analysis {
    let mut aggregator = Aggregator::new(config);
    for (index, enc) in encounters.iter().enumerate() {
        aggregator.add(index, enc);
    }
    aggregator.finish(encounters)
}
