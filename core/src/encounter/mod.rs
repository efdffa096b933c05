//! Encounter segmentation.
//!
//! A session log is a flat stream of lines. [`EncounterParser`] folds it into
//! [`Encounter`] records, one per adventure (plus metadata-only segments),
//! using [`EncounterBuilder`] as the per-segment state machine.

mod alias;
mod builder;
mod parser;


pub use alias::synthesize_alias;
pub use builder::{EncounterBuilder, Step};
pub use parser::{EncounterParser, ParseOutput};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::state::MetadataContext;

/// One parsed segment of the log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Encounter {
    /// Adventure number from the `[N] location` line.
    pub number: u32,
    pub location: Option<String>,
    pub title: String,
    /// Resolved adversary; falls back to the title for combats where the
    /// monster never showed up in a damage line.
    pub monster: Option<String>,
    /// Metadata declared in this segment. Alias copies share it.
    #[serde(skip)]
    pub metadata: Arc<MetadataContext>,
    /// Synthesized duplicate filed under a virtual monster name.
    pub is_alias: bool,
    pub is_combat: bool,
    /// The player acted first.
    pub got_jump: bool,
    pub effects: Vec<String>,
    pub won: bool,
    /// Round number -> damage dealt to the monster in that round.
    pub monster_damage: BTreeMap<u32, Vec<i64>>,
    /// Hit points lost, in log order.
    pub damage_taken: Vec<i64>,
    pub meat: i64,
    /// Items dropped by a won fight.
    pub kept: Vec<String>,
    pub stolen: Vec<String>,
    /// Items gained some other way (deals, non-winning fights).
    pub misc: Vec<String>,
    /// Raw stat gains by stat index.
    pub stats: [i64; 3],
}

impl Encounter {
    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// Stats are the last thing a fight awards.
    pub fn has_stats(&self) -> bool {
        self.stats.iter().any(|&gain| gain != 0)
    }

    /// Name used to group this encounter: the monster for combats, the
    /// title otherwise.
    pub fn display_name(&self) -> &str {
        self.monster.as_deref().unwrap_or(&self.title)
    }

    /// Multi-line summary: the display line followed by whichever of items,
    /// stolen items, other items, monster damage and stat gains are present.
    pub fn overview(&self) -> String {
        let mut out = self.to_string();
        for (label, items) in [
            ("Found", &self.kept),
            ("Stole", &self.stolen),
            ("Somehow gained", &self.misc),
        ] {
            if !items.is_empty() {
                out += &format!("\n{}: {}", label, items.join(", "));
            }
        }
        if self.monster_damage.values().flatten().any(|&d| d != 0) {
            let rounds: Vec<String> = self
                .monster_damage
                .iter()
                .map(|(round, hits)| {
                    let hits: Vec<String> = hits.iter().map(i64::to_string).collect();
                    format!("{}: {}", round, hits.join("+"))
                })
                .collect();
            out += &format!("\nMonster took damage {}", rounds.join(", "));
        }
        if self.has_stats() {
            out += &format!(
                "\nGained stats {} / {} / {}",
                self.stats[0], self.stats[1], self.stats[2]
            );
        }
        out
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_combat { "Combat" } else { "Noncombat" };
        write!(f, "{} #{}", kind, self.number)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        if let Some(monster) = &self.monster {
            write!(f, ": {}", monster)?;
        } else if !self.title.is_empty() {
            write!(f, ": {}", self.title)?;
        }
        Ok(())
    }
}
