//! Character state snapshot carried across encounters.
//!
//! The same type plays two roles:
//! - per segment, it records only what the log *declared* in that segment
//!   (everything else stays `None`/zero);
//! - during analysis, a running context starts from [`MetadataContext::neutral`]
//!   and merges each segment in with [`MetadataContext::import_from`].

use serde::Serialize;

use crate::error::Error;
use crate::game_data::Stat;

/// Largest magnitude accepted for a whole-number modifier.
const WHOLE_LIMIT: i64 = 1_000_000_000;

fn whole(value: f64) -> i64 {
    (value.trunc() as i64).clamp(-WHOLE_LIMIT, WHOLE_LIMIT)
}

/// Initiative observation: `(effective initiative, main stat base, monster level)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InitiativeSample {
    pub initiative: i64,
    pub main_stat: i64,
    pub monster_level: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataContext {
    pub class: Option<String>,
    /// `None` when the class is unknown or not a recognized class name.
    pub main_stat: Option<Stat>,
    pub stat_bases: [i64; 3],
    /// Stat points gained while the base was unknown.
    pub stat_points: [i64; 3],
    pub stat_day: Option<String>,
    pub stat_day_stat: Option<Stat>,
    pub monster_level: Option<i64>,
    pub combat_rate: Option<i64>,
    /// Initiative bonus in percent.
    pub initiative: Option<i64>,
    /// Initiative as reported by the game, stored for reference only.
    pub real_initiative: Option<i64>,
    /// Flat stats gained per fight from +exp (twice the declared value).
    pub bonus_stat: Option<f64>,
    pub meat_multiplier: Option<f64>,
    pub item_multiplier: Option<f64>,
}

impl MetadataContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Running context before anything has been declared: no adjustments,
    /// 1.0x multipliers.
    pub fn neutral() -> Self {
        Self {
            monster_level: Some(0),
            combat_rate: Some(0),
            initiative: Some(0),
            bonus_stat: Some(0.0),
            meat_multiplier: Some(1.0),
            item_multiplier: Some(1.0),
            ..Self::default()
        }
    }

    /// True once any metadata line has touched this snapshot.
    pub fn is_declared(&self) -> bool {
        *self != Self::default()
    }

    pub fn set_class(&mut self, class: &str) {
        self.class = Some(class.to_string());
        self.main_stat = Stat::from_word(class);
    }

    pub fn set_stat_base(&mut self, stat: Stat, base: i64) {
        self.stat_bases[stat.index()] = base;
        self.stat_points[stat.index()] = 0;
    }

    pub fn gain_stat_point(&mut self, stat: Stat) {
        let i = stat.index();
        if self.stat_bases[i] != 0 {
            self.stat_bases[i] = self.stat_bases[i].saturating_add(1);
        } else {
            self.stat_points[i] = self.stat_points[i].saturating_add(1);
        }
    }

    pub fn set_stat_day(&mut self, word: &str) {
        self.stat_day = Some(word.to_string());
        self.stat_day_stat = Stat::from_word(word);
    }

    /// Apply a `key=value` modifier. Keys are case-insensitive; unknown keys
    /// are ignored. Whole-number values are clamped to +/-1e9 and
    /// non-finite numbers are rejected.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let key = key.trim().to_lowercase();
        let number = || {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| Error::InvalidMetadataValue {
                    key: key.clone(),
                    value: value.to_string(),
                })
        };
        match key.as_str() {
            "class" => self.set_class(value.trim()),
            "ml" => self.monster_level = Some(whole(number()?)),
            "enc" => self.combat_rate = Some(whole(number()?)),
            "init" => self.initiative = Some(whole(number()?)),
            "real_init" => self.real_initiative = Some(whole(number()?)),
            "exp" => self.bonus_stat = Some(number()? * 2.0),
            "meat" => self.meat_multiplier = Some(number()? / 100.0 + 1.0),
            "item" => self.item_multiplier = Some(number()? / 100.0 + 1.0),
            other => {
                if let Some(stat) = Stat::from_word(other) {
                    self.set_stat_base(stat, whole(number()?));
                }
            }
        }
        Ok(())
    }

    /// Merge a segment's declarations into this running context.
    ///
    /// A declared base overwrites; otherwise the points this context was
    /// holding are folded into its base and it adopts the segment's pending
    /// points. Scalars overwrite only when the segment declared them.
    pub fn import_from(&mut self, other: &MetadataContext) {
        if let Some(class) = &other.class {
            self.class = Some(class.clone());
            self.main_stat = other.main_stat;
        }
        for i in 0..3 {
            if other.stat_bases[i] != 0 {
                self.stat_bases[i] = other.stat_bases[i];
            } else {
                self.stat_bases[i] = self.stat_bases[i].saturating_add(self.stat_points[i]);
            }
            self.stat_points[i] = other.stat_points[i];
        }
        if let Some(day) = &other.stat_day {
            self.stat_day = Some(day.clone());
            self.stat_day_stat = other.stat_day_stat;
        }
        if other.monster_level.is_some() {
            self.monster_level = other.monster_level;
        }
        if other.combat_rate.is_some() {
            self.combat_rate = other.combat_rate;
        }
        if other.initiative.is_some() {
            self.initiative = other.initiative;
        }
        if other.real_initiative.is_some() {
            self.real_initiative = other.real_initiative;
        }
        if other.bonus_stat.is_some() {
            self.bonus_stat = other.bonus_stat;
        }
        if other.meat_multiplier.is_some() {
            self.meat_multiplier = other.meat_multiplier;
        }
        if other.item_multiplier.is_some() {
            self.item_multiplier = other.item_multiplier;
        }
    }

    pub fn main_stat_base(&self) -> i64 {
        self.main_stat.map_or(0, |s| self.stat_bases[s.index()])
    }

    pub fn initiative_sample(&self) -> InitiativeSample {
        let ml = self.monster_level.unwrap_or(0);
        InitiativeSample {
            initiative: effective_initiative(self.initiative.unwrap_or(0), ml),
            main_stat: self.main_stat_base(),
            monster_level: ml,
        }
    }
}

/// Initiative bonus after the monster-level penalty. Each 20-ML band above
/// 20 costs one more point of initiative per point of ML.
pub fn effective_initiative(initiative: i64, ml: i64) -> i64 {
    let penalty = match ml {
        ..=20 => 0,
        21..=40 => ml - 20,
        41..=60 => ml * 2 - 60,
        61..=80 => ml * 3 - 120,
        81..=100 => ml * 4 - 200,
        _ => ml.saturating_mul(5).saturating_sub(300),
    };
    initiative.saturating_sub(penalty)
}
