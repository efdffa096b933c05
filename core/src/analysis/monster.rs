use std::cell::OnceCell;
use std::collections::BTreeMap;

use super::crunch::{MonsterStats, crunch};
use super::item::Item;
use crate::encounter::Encounter;
use crate::state::InitiativeSample;

/// One fight against this monster, by position in the encounter list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub index: usize,
    /// Item multiplier plus buff bonuses in force for the fight.
    pub item_divisor: f64,
}

/// How one item fared across every fight with a monster.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ItemTrials {
    /// Divisors of fights that dropped it, ascending.
    pub dropped: Vec<f64>,
    /// Divisors of fights that did not, descending.
    pub not_dropped: Vec<f64>,
    pub stolen: u32,
}

/// Samples accumulated for one adversary.
#[derive(Debug, Clone, Default)]
pub struct Monster {
    pub name: String,
    pub encountered: u32,
    pub defeated: u32,
    pub trials: Vec<Trial>,
    pub jumps: Vec<InitiativeSample>,
    pub jumpeds: Vec<InitiativeSample>,
    pub stat_samples: Vec<f64>,
    pub meat_samples: Vec<f64>,
    pub items: BTreeMap<String, Item>,
    stats: OnceCell<MonsterStats>,
}

impl Monster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_encounter(
        &mut self,
        index: usize,
        item_divisor: f64,
        initiative: InitiativeSample,
        got_jump: bool,
    ) {
        self.stats.take();
        self.encountered += 1;
        self.trials.push(Trial {
            index,
            item_divisor,
        });
        if got_jump {
            self.jumps.push(initiative);
        } else {
            self.jumpeds.push(initiative);
        }
    }

    pub fn add_win(&mut self, stat_sample: f64, meat_sample: f64) {
        self.stats.take();
        self.defeated += 1;
        self.stat_samples.push(stat_sample);
        self.meat_samples.push(meat_sample);
    }

    pub fn item_mut(&mut self, name: &str) -> &mut Item {
        self.items.entry(name.to_string()).or_default()
    }

    /// Derived statistics, computed on first use after the last change.
    pub fn stats(&self) -> &MonsterStats {
        self.stats.get_or_init(|| {
            crunch(
                &self.stat_samples,
                &self.meat_samples,
                &self.jumps,
                &self.jumpeds,
            )
        })
    }

    /// Per-fight breakdown for one item. `encounters` must be the list the
    /// trial indices were taken from.
    pub fn item_trials(&self, item: &str, encounters: &[Encounter]) -> ItemTrials {
        let mut trials = ItemTrials::default();
        for trial in &self.trials {
            let Some(enc) = encounters.get(trial.index) else {
                continue;
            };
            if enc.stolen.iter().any(|i| i == item) {
                trials.stolen += 1;
            } else if enc.kept.iter().any(|i| i == item) {
                trials.dropped.push(trial.item_divisor);
            } else {
                trials.not_dropped.push(trial.item_divisor);
            }
        }
        trials.dropped.sort_by(f64::total_cmp);
        trials.not_dropped.sort_by(|a, b| b.total_cmp(a));
        trials
    }
}
