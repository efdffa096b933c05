//! Report records handed to renderers.

use serde::Serialize;

use super::crunch::InitiativeEstimate;
use super::monster::{ItemTrials, Monster};
use crate::encounter::Encounter;

/// Mean with the sample range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeSummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl RangeSummary {
    /// `samples` must be sorted ascending.
    fn from_sorted(average: f64, samples: &[f64]) -> Option<Self> {
        Some(Self {
            average,
            min: *samples.first()?,
            max: *samples.last()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub found: u32,
    pub stolen: u32,
    pub misc: u32,
    pub prevented: u32,
    /// `None` when every trial was lost to theft.
    pub rate: Option<f64>,
    pub trials: ItemTrials,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonsterReport {
    pub name: String,
    pub encountered: u32,
    pub defeated: u32,
    pub level: i64,
    pub stats: Option<RangeSummary>,
    /// `None` when no meat was ever seen.
    pub meat: Option<RangeSummary>,
    pub initiative: InitiativeEstimate,

    // ─── Detail samples ──────────────────────────────────────────────────────
    pub stat_samples: Vec<f64>,
    pub meat_samples: Vec<f64>,
    pub jump_inits: Vec<i64>,
    pub jumped_inits: Vec<i64>,

    pub items: Vec<ItemReport>,
}

impl MonsterReport {
    pub fn new(monster: &Monster, encounters: &[Encounter]) -> Self {
        let stats = monster.stats();
        let meat = if stats.meat_samples.iter().sum::<f64>() != 0.0 {
            RangeSummary::from_sorted(stats.average_meat, &stats.meat_samples)
        } else {
            None
        };

        let items = monster
            .items
            .iter()
            .map(|(name, item)| ItemReport {
                name: name.clone(),
                found: item.found,
                stolen: item.stolen,
                misc: item.misc,
                prevented: item.prevented,
                rate: item.drop_rate(monster.defeated),
                trials: monster.item_trials(name, encounters),
            })
            .collect();

        Self {
            name: monster.name.clone(),
            encountered: monster.encountered,
            defeated: monster.defeated,
            level: stats.level,
            stats: RangeSummary::from_sorted(stats.average_stat, &stats.stat_samples),
            meat,
            initiative: stats.initiative,
            stat_samples: stats.stat_samples.clone(),
            meat_samples: stats.meat_samples.clone(),
            jump_inits: stats.jump_inits.clone(),
            jumped_inits: stats.jumped_inits.clone(),
            items,
        }
    }

    pub fn item(&self, name: &str) -> Option<&ItemReport> {
        self.items.iter().find(|i| i.name == name)
    }
}
