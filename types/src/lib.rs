//! Shared configuration types for kolstat.
//!
//! These are plain serde structs so they can be loaded from TOML by the core
//! crate and persisted by the command-line tool.

pub mod formatting;

use serde::{Deserialize, Serialize};

/// An effect that, when gained during an encounter, raises the item-drop
/// multiplier for that encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBuff {
    pub effect: String,
    pub bonus: f64,
}

/// Heuristic parameters for the encounter analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Assumed moon sign bonus to the main stat (fraction, 0.10 = +10%).
    pub main_stat_bonus: f64,
    /// Extra gain for today's bonus stat.
    pub stat_day_bonus: f64,
    /// The stat-day bonus only applies to adventures numbered above this.
    pub stat_day_min_adventure: u32,
    /// Lines after a Rave Steal combo whose item gains count as thefts.
    pub rave_steal_window: u32,
    /// Marker that introduces a `key=value;` metadata block.
    pub metadata_marker: String,
    pub item_buffs: Vec<ItemBuff>,
    pub report: ReportConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            main_stat_bonus: 0.10,
            stat_day_bonus: 0.25,
            stat_day_min_adventure: 1000,
            rave_steal_window: 3,
            metadata_marker: "[kol_parse];".to_string(),
            item_buffs: vec![
                ItemBuff {
                    effect: "Disco Concentration".to_string(),
                    bonus: 0.2,
                },
                ItemBuff {
                    effect: "Rave Concentration".to_string(),
                    bonus: 0.3,
                },
            ],
            report: ReportConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Sum of the item bonuses granted by the given effects.
    pub fn item_buff_bonus<'a>(&self, effects: impl IntoIterator<Item = &'a String>) -> f64 {
        let effects: Vec<&String> = effects.into_iter().collect();
        self.item_buffs
            .iter()
            .filter(|buff| effects.iter().any(|e| **e == buff.effect))
            .map(|buff| buff.bonus)
            .sum()
    }
}

/// Report rendering options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Include per-monster sample lists and per-item trial breakdowns.
    pub details: bool,
    pub european_numbers: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
stat_day_bonus = 0.5

[report]
details = true
"#,
        )
        .unwrap();
        assert_eq!(config.stat_day_bonus, 0.5);
        assert_eq!(config.main_stat_bonus, 0.10);
        assert_eq!(config.rave_steal_window, 3);
        assert_eq!(config.item_buffs.len(), 2);
        assert!(config.report.details);
        assert!(!config.report.european_numbers);
    }

    #[test]
    fn test_item_buffs_override() {
        let config: AnalysisConfig = toml::from_str(
            r#"
[[item_buffs]]
effect = "Lucky Charm"
bonus = 0.1
"#,
        )
        .unwrap();
        assert_eq!(
            config.item_buffs,
            vec![ItemBuff {
                effect: "Lucky Charm".to_string(),
                bonus: 0.1
            }]
        );
    }

    #[test]
    fn test_item_buff_bonus_sums_active_effects() {
        let config = AnalysisConfig::default();
        let effects = vec!["Disco Concentration".to_string(), "Rave Concentration".to_string()];
        assert!((config.item_buff_bonus(&effects) - 0.5).abs() < 1e-9);
        let none: Vec<String> = vec!["Leash of Linguini".to_string()];
        assert_eq!(config.item_buff_bonus(&none), 0.0);
    }

    #[test]
    fn test_round_trip_default() {
        let config = AnalysisConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: AnalysisConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
