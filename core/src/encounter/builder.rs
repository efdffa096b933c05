//! Per-segment state machine.
//!
//! Until the adventure line arrives a segment only absorbs metadata. After
//! it, title, round, damage, item and stat lines fill in the encounter. A
//! segment ends on a blank line, on the next adventure line, on
//! out-of-combat metadata, or on a meat/item line that arrives after stats
//! were already awarded. All but the blank line leave the line unconsumed
//! so it can start the next segment.

use std::sync::Arc;

use kolstat_types::AnalysisConfig;

use super::Encounter;
use crate::combat_log::{Classified, LineEvent};
use crate::state::MetadataContext;
use crate::warnings::Warnings;

/// Outcome of feeding one line to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The line belongs to this segment (or to nothing).
    Consumed,
    /// The segment is over. When `consumed` is false the line must be fed
    /// to a fresh builder.
    Closed { consumed: bool },
}

#[derive(Debug, Clone)]
pub struct EncounterBuilder<'a> {
    config: &'a AnalysisConfig,
    encounter: Encounter,
    metadata: MetadataContext,
    round: u32,
    rave_steal_remaining: u32,
    previous_steal: bool,
    previous_deal: bool,
}

impl<'a> EncounterBuilder<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self {
            config,
            encounter: Encounter::default(),
            metadata: MetadataContext::new(),
            round: 0,
            rave_steal_remaining: 0,
            previous_steal: false,
            previous_deal: false,
        }
    }

    pub fn step(&mut self, line: &str, classified: &Classified, warnings: &mut Warnings) -> Step {
        let has_location = self.encounter.has_location();
        if has_location && line.is_empty() {
            return Step::Closed { consumed: true };
        }

        let stealing = self.previous_steal || self.rave_steal_remaining > 0;
        let dealing = self.previous_deal;
        self.previous_steal = classified.has_steal_attempt();
        self.previous_deal = classified.has_broker_deal();
        self.rave_steal_remaining = self.rave_steal_remaining.saturating_sub(1);

        let events = classified.events();

        if let Some(LineEvent::AdventureStart { number, location }) = events.first() {
            if has_location {
                tracing::debug!(next = number, "Parsing interrupted by another adventure");
                return Step::Closed { consumed: false };
            }
            self.encounter.number = *number;
            self.encounter.location = Some(location.clone());
            tracing::debug!(number, location = %location, "Parsing adventure");
            return Step::Consumed;
        }

        if has_location && classified.is_outside_combat() {
            return Step::Closed { consumed: false };
        }

        for event in events {
            if self.apply_metadata(event, warnings) {
                return Step::Consumed;
            }
        }

        // Encounter data only counts once the adventure has begun.
        if !has_location {
            return Step::Consumed;
        }

        for event in events {
            if let Some(step) = self.apply_encounter_event(event, stealing, dealing) {
                return step;
            }
        }
        Step::Consumed
    }

    /// Returns true if the event was a metadata declaration.
    fn apply_metadata(&mut self, event: &LineEvent, warnings: &mut Warnings) -> bool {
        match event {
            LineEvent::ClassDeclaration { class } => self.metadata.set_class(class),
            LineEvent::StatBaseDeclaration { stat, base } => {
                self.metadata.set_stat_base(*stat, *base)
            }
            LineEvent::StatDayDeclaration { word } => {
                self.metadata.set_stat_day(word);
                if self.metadata.stat_day_stat.is_none() {
                    warnings.push(format!("Unrecognized stat day: {}", word));
                }
            }
            LineEvent::BonusModifierDeclaration { key, value } => {
                if let Err(e) = self.metadata.set_value(key, value) {
                    warnings.push(e.to_string());
                }
            }
            LineEvent::StatPointGain { stat } => self.metadata.gain_stat_point(*stat),
            LineEvent::StructuredMetadataBlock { pairs } => {
                for (key, value) in pairs {
                    if let Err(e) = self.metadata.set_value(key, value) {
                        warnings.push(e.to_string());
                    }
                }
            }
            _ => return false,
        }
        true
    }

    /// Returns `None` when the event does not settle the line.
    fn apply_encounter_event(
        &mut self,
        event: &LineEvent,
        stealing: bool,
        dealing: bool,
    ) -> Option<Step> {
        let enc = &mut self.encounter;
        match event {
            LineEvent::EncounterTitle { title } => enc.title = title.clone(),
            LineEvent::RoundMarker { round } => {
                self.round = *round;
                enc.is_combat = true;
                return None;
            }
            LineEvent::InitiativeJump => enc.got_jump = true,
            LineEvent::MonsterDamage { name, amount } => {
                enc.monster = Some(name.clone());
                enc.monster_damage.entry(self.round).or_default().push(*amount);
            }
            LineEvent::HpLoss { amount } => enc.damage_taken.push(*amount),
            LineEvent::EffectGained { name, .. } => enc.effects.push(name.clone()),
            LineEvent::FightWon => enc.won = true,
            LineEvent::CurrencyGain { amount } => {
                if enc.has_stats() {
                    return Some(Step::Closed { consumed: false });
                }
                if enc.won {
                    enc.meat = *amount;
                }
            }
            LineEvent::RaveStealStart => self.rave_steal_remaining = self.config.rave_steal_window,
            LineEvent::ItemGain { name } => {
                if enc.has_stats() {
                    return Some(Step::Closed { consumed: false });
                }
                Self::add_items(enc, name, 1, stealing, dealing);
            }
            LineEvent::ItemGainMulti { name, count } => {
                if enc.has_stats() {
                    return Some(Step::Closed { consumed: false });
                }
                Self::add_items(enc, name, *count, stealing, dealing);
            }
            LineEvent::StatGain { amount, stat } => {
                if !enc.won {
                    return None;
                }
                if let Some(stat) = stat {
                    enc.stats[stat.index()] = *amount;
                }
            }
            _ => return None,
        }
        Some(Step::Consumed)
    }

    fn add_items(enc: &mut Encounter, name: &str, count: u32, stealing: bool, dealing: bool) {
        let bucket = if stealing {
            &mut enc.stolen
        } else if dealing || !enc.won {
            &mut enc.misc
        } else {
            &mut enc.kept
        };
        bucket.extend(std::iter::repeat_n(name.to_string(), count as usize));
    }

    /// Close the segment. Returns `None` for a segment that saw neither an
    /// adventure nor any metadata.
    pub fn finish(self) -> Option<Encounter> {
        let mut enc = self.encounter;
        if !enc.has_location() && !self.metadata.is_declared() {
            return None;
        }
        if enc.is_combat && enc.monster.is_none() {
            enc.monster = Some(enc.title.clone());
        }
        enc.metadata = Arc::new(self.metadata);
        Some(enc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::LineClassifier;

    fn feed(builder: &mut EncounterBuilder<'_>, line: &str) -> Step {
        let classified = LineClassifier::new("[kol_parse];").classify(line);
        builder.step(line, &classified, &mut Warnings::new())
    }

    #[test]
    fn test_metadata_before_adventure() {
        let config = AnalysisConfig::default();
        let mut builder = EncounterBuilder::new(&config);
        assert_eq!(feed(&mut builder, "Class: Sauceror"), Step::Consumed);
        // Blank lines only close a segment once it has a location.
        assert_eq!(feed(&mut builder, ""), Step::Consumed);
        // Encounter data before the adventure line is dropped.
        assert_eq!(feed(&mut builder, "Encounter: Goblin"), Step::Consumed);

        assert_eq!(feed(&mut builder, "[4] Zone"), Step::Consumed);
        feed(&mut builder, "Encounter: Goblin");
        feed(&mut builder, "Round 3: You win the fight!");
        let enc = builder.finish().unwrap();
        assert_eq!(enc.number, 4);
        assert_eq!(enc.title, "Goblin");
        assert!(enc.won && enc.is_combat);
        assert_eq!(enc.monster.as_deref(), Some("Goblin"));
        assert_eq!(enc.metadata.class.as_deref(), Some("Sauceror"));
    }

    #[test]
    fn test_closing_steps() {
        let config = AnalysisConfig::default();
        let mut builder = EncounterBuilder::new(&config);
        feed(&mut builder, "[4] Zone");
        assert_eq!(feed(&mut builder, "[5] Zone"), Step::Closed { consumed: false });
        assert_eq!(feed(&mut builder, "Mox: 10, tnp = 3"), Step::Closed { consumed: false });
        assert_eq!(feed(&mut builder, ""), Step::Closed { consumed: true });
        // Not an outside-combat line
        assert_eq!(feed(&mut builder, "You gain a Moxie point!"), Step::Consumed);
    }

    #[test]
    fn test_finish() {
        let config = AnalysisConfig::default();
        assert!(EncounterBuilder::new(&config).finish().is_none());

        let mut builder = EncounterBuilder::new(&config);
        feed(&mut builder, "Init: -20");
        let enc = builder.finish().unwrap();
        assert!(!enc.has_location());
        assert_eq!(enc.metadata.initiative, Some(-20));
    }
}
