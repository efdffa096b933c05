//! Line vocabulary of a session log.
//!
//! Every line is classified independently into zero or more [`LineEvent`]s.
//! Metadata events describe the character (class, stats, modifiers) and may
//! appear anywhere; encounter events only mean something inside an
//! adventure.

mod classifier;

pub use classifier::{LineClassifier, unescape};

use crate::game_data::Stat;

/// One recognized fact about a log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    /// `[123] The Haunted Pantry`
    AdventureStart { number: u32, location: String },
    /// `Class: Seal Clubber`
    ClassDeclaration { class: String },
    /// `Mus: 120 (100), tnp = 40` (base is the parenthesised value when present)
    StatBaseDeclaration { stat: Stat, base: i64 },
    /// `Muscle bonus today`
    StatDayDeclaration { word: String },
    /// `ML: +25`, `Item: +30.5%`
    BonusModifierDeclaration { key: String, value: String },
    /// `You gain a Muscle point!`
    StatPointGain { stat: Stat },
    /// `[kol_parse]; ml=25; item=50;`
    StructuredMetadataBlock { pairs: Vec<(String, String)> },
    /// `Encounter: fluffy bunny`
    EncounterTitle { title: String },
    /// `Round 3: ...`
    RoundMarker { round: u32 },
    /// `... wins initiative!`
    InitiativeJump,
    /// `...: fluffy bunny takes 12 damage.`
    MonsterDamage { name: String, amount: i64 },
    /// `You lose 4 hit points`
    HpLoss { amount: i64 },
    /// `You acquire an effect: Disco Concentration (duration: 5 Adventures)`
    EffectGained { name: String, duration: u32 },
    /// `... wins the fight!`
    FightWon,
    /// `You gain 50 Meat`
    CurrencyGain { amount: i64 },
    /// `Rave combo: Rave Steal`
    RaveStealStart,
    /// `You acquire an item: bunny liver`
    ItemGain { name: String },
    /// `You acquire bunny liver (3)`
    ItemGainMulti { name: String, count: u32 },
    /// `You gain 12 Beefiness`; `stat` is `None` for unknown words.
    StatGain { amount: i64, stat: Option<Stat> },
    /// `... tries to steal an item!` (affects the following line)
    StealAttempt,
    /// `... brokers a quick deal, and splits the profits with you.` (affects the following line)
    BrokerDeal,
}

impl LineEvent {
    /// Metadata that only appears between fights and therefore ends an
    /// encounter in progress.
    pub fn is_outside_combat(&self) -> bool {
        match self {
            LineEvent::ClassDeclaration { .. }
            | LineEvent::StatBaseDeclaration { .. }
            | LineEvent::StatDayDeclaration { .. }
            | LineEvent::BonusModifierDeclaration { .. } => true,
            LineEvent::StructuredMetadataBlock { pairs } => !pairs.is_empty(),
            _ => false,
        }
    }

    /// Any event that updates character metadata.
    pub fn is_meta(&self) -> bool {
        self.is_outside_combat() || matches!(self, LineEvent::StatPointGain { .. })
    }
}

/// All events recognized on one line, in dispatch precedence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    events: Vec<LineEvent>,
}

impl Classified {
    pub fn new(events: Vec<LineEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[LineEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_outside_combat(&self) -> bool {
        self.events.iter().any(LineEvent::is_outside_combat)
    }

    pub fn is_meta(&self) -> bool {
        self.events.iter().any(LineEvent::is_meta)
    }

    pub fn has_steal_attempt(&self) -> bool {
        self.events.contains(&LineEvent::StealAttempt)
    }

    pub fn has_broker_deal(&self) -> bool {
        self.events.contains(&LineEvent::BrokerDeal)
    }
}
