use std::sync::LazyLock;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::Regex;

use super::{Classified, LineEvent};
use crate::game_data::Stat;

struct Patterns {
    adventure: Regex,
    class: Regex,
    stat_base: Regex,
    stat_day: Regex,
    bonus: Regex,
    stat_point: Regex,
    metadata_pair: Regex,
    encounter: Regex,
    round: Regex,
    jump: Regex,
    monster_damage: Regex,
    hp_loss: Regex,
    effect: Regex,
    win: Regex,
    meat: Regex,
    rave_steal: Regex,
    item: Regex,
    multi_item: Regex,
    stat_gain: Regex,
    steal: Regex,
    deal: Regex,
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid built-in pattern {re:?}: {e}"))
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    adventure: pattern(r"^\[(\d+)\] (.+)"),
    class: pattern(r"^Class: ([ A-DMPSTZa-fhil-or-v]+)$"),
    stat_base: pattern(r"^(Mus|Mys|Mox): (\d+)( \((\d+)\))?, tnp = \d+"),
    stat_day: pattern(r"^([A-Za-z]+) bonus today"),
    bonus: pattern(r"^(ML|Enc|Init|Exp|Meat|Item): ([+\-]\d+\.?\d*)%?$"),
    stat_point: pattern(r"^You gain a (Muscle|Mysticality|Moxie) point!"),
    metadata_pair: pattern(r" ([^=;]+)=([^=;]+);"),
    encounter: pattern(r"^Encounter: (.+)"),
    round: pattern(r"^Round (\d+):"),
    jump: pattern(r" wins initiative!"),
    monster_damage: pattern(r": (.+) takes (\d+) damage\.$"),
    hp_loss: pattern(r"^You lose (\d+) hit points?$"),
    effect: pattern(r"^You acquire an effect: (.+) \(duration: (\d+)"),
    win: pattern(r" wins? the fight!"),
    meat: pattern(r"^You gain (\d+) Meat"),
    rave_steal: pattern(r"^Rave combo: Rave Steal$"),
    item: pattern(r"^You acquire an item: (.+)"),
    multi_item: pattern(r"^You acquire (.+) \((\d+)\)$"),
    stat_gain: pattern(r"^You gain (\d+) ([BCEFMRSWa-ik-pr-uyz]+)$"),
    steal: pattern(r" tries to steal an item!"),
    deal: pattern(r" brokers a quick deal, and splits the profits with you\."),
});

/// Decode HTML entities in free text captured from the log.
///
/// Text with a malformed entity (e.g. a bare `&`) is returned unchanged.
pub fn unescape(text: &str) -> String {
    match unescape_with(text, resolve_html5_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Stateless line classifier.
///
/// Runs every pattern against the line and returns all matches, ordered the
/// way the encounter state machine consumes them.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    metadata_marker: String,
}

impl LineClassifier {
    pub fn new(metadata_marker: impl Into<String>) -> Self {
        Self {
            metadata_marker: metadata_marker.into(),
        }
    }

    pub fn classify(&self, line: &str) -> Classified {
        let p = &*PATTERNS;
        let mut events = Vec::new();

        if let Some(c) = p.adventure.captures(line)
            && let Ok(number) = c[1].parse()
        {
            events.push(LineEvent::AdventureStart {
                number,
                location: c[2].to_string(),
            });
        }

        // Metadata
        if let Some(c) = p.class.captures(line) {
            events.push(LineEvent::ClassDeclaration {
                class: c[1].to_string(),
            });
        }
        if let Some(c) = p.stat_base.captures(line)
            && let Some(stat) = Stat::from_word(&c[1])
        {
            let base = c.get(4).map_or(&c[2], |m| m.as_str());
            if let Ok(base) = base.parse() {
                events.push(LineEvent::StatBaseDeclaration { stat, base });
            }
        }
        if let Some(c) = p.stat_day.captures(line) {
            events.push(LineEvent::StatDayDeclaration {
                word: c[1].to_string(),
            });
        }
        if let Some(c) = p.bonus.captures(line) {
            events.push(LineEvent::BonusModifierDeclaration {
                key: c[1].to_string(),
                value: c[2].to_string(),
            });
        }
        if let Some(c) = p.stat_point.captures(line)
            && let Some(stat) = Stat::from_word(&c[1])
        {
            events.push(LineEvent::StatPointGain { stat });
        }
        if !self.metadata_marker.is_empty() && line.contains(self.metadata_marker.as_str()) {
            let pairs: Vec<(String, String)> = p
                .metadata_pair
                .captures_iter(line)
                .map(|c| (c[1].to_string(), c[2].to_string()))
                .collect();
            if !pairs.is_empty() {
                events.push(LineEvent::StructuredMetadataBlock { pairs });
            }
        }

        // Encounter body
        if let Some(c) = p.encounter.captures(line) {
            events.push(LineEvent::EncounterTitle {
                title: unescape(&c[1]),
            });
        }
        if let Some(c) = p.round.captures(line)
            && let Ok(round) = c[1].parse()
        {
            events.push(LineEvent::RoundMarker { round });
        }
        if p.jump.is_match(line) {
            events.push(LineEvent::InitiativeJump);
        }
        if let Some(c) = p.monster_damage.captures(line)
            && let Ok(amount) = c[2].parse()
        {
            events.push(LineEvent::MonsterDamage {
                name: unescape(&c[1]),
                amount,
            });
        }
        if let Some(c) = p.hp_loss.captures(line)
            && let Ok(amount) = c[1].parse()
        {
            events.push(LineEvent::HpLoss { amount });
        }
        if let Some(c) = p.effect.captures(line)
            && let Ok(duration) = c[2].parse()
        {
            events.push(LineEvent::EffectGained {
                name: unescape(&c[1]),
                duration,
            });
        }
        if p.win.is_match(line) {
            events.push(LineEvent::FightWon);
        }
        if let Some(c) = p.meat.captures(line)
            && let Ok(amount) = c[1].parse()
        {
            events.push(LineEvent::CurrencyGain { amount });
        }
        if p.rave_steal.is_match(line) {
            events.push(LineEvent::RaveStealStart);
        }
        if let Some(c) = p.item.captures(line) {
            events.push(LineEvent::ItemGain {
                name: unescape(&c[1]),
            });
        }
        if let Some(c) = p.multi_item.captures(line)
            && let Ok(count) = c[2].parse()
        {
            events.push(LineEvent::ItemGainMulti {
                name: unescape(&c[1]),
                count,
            });
        }
        if let Some(c) = p.stat_gain.captures(line)
            && let Ok(amount) = c[1].parse()
        {
            events.push(LineEvent::StatGain {
                amount,
                stat: Stat::from_word(&c[2]),
            });
        }

        // Modifiers for the next line
        if p.steal.is_match(line) {
            events.push(LineEvent::StealAttempt);
        }
        if p.deal.is_match(line) {
            events.push(LineEvent::BrokerDeal);
        }

        Classified::new(events)
    }
}
