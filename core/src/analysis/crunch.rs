//! Derived per-monster statistics.

use serde::Serialize;

use crate::state::InitiativeSample;

/// Initiative reconciliation result.
///
/// `lower` is the initiative above which the player was never jumped,
/// `upper` the one at which the player always got the jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InitiativeEstimate {
    pub guess: Option<i64>,
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl InitiativeEstimate {
    pub fn is_unknown(&self) -> bool {
        self.guess.is_none() && self.lower.is_none() && self.upper.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonsterStats {
    /// Sorted ascending.
    pub stat_samples: Vec<f64>,
    pub average_stat: f64,
    pub level: i64,
    /// Sorted ascending.
    pub meat_samples: Vec<f64>,
    pub average_meat: f64,
    pub jump_inits: Vec<i64>,
    pub jumped_inits: Vec<i64>,
    pub initiative: InitiativeEstimate,
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

fn sorted(samples: &[f64]) -> Vec<f64> {
    let mut samples = samples.to_vec();
    samples.sort_by(f64::total_cmp);
    samples
}

/// Initiative the player would have needed, adjusted for the stat
/// advantage over the monster.
fn adjusted_initiative(sample: &InitiativeSample, level: i64) -> i64 {
    let advantage = sample
        .main_stat
        .saturating_sub(level)
        .saturating_sub(sample.monster_level);
    sample.initiative.saturating_add(advantage.max(0))
}

/// Reconcile jump and jumped observations into an initiative range.
///
/// Every jumped value below the lowest jump, and every jump value below the
/// highest jumped, is evidence for the crossover point. Jumped values are
/// shifted by 100 onto the jump scale before averaging.
pub fn reconcile_initiative(jump_inits: &[i64], jumped_inits: &[i64]) -> InitiativeEstimate {
    let min_jump = jump_inits.iter().min().copied();
    let max_jumped = jumped_inits.iter().max().copied();

    let guess = match (min_jump, max_jumped) {
        (Some(min_jump), Some(max_jumped)) => {
            let jumps: Vec<i64> = jump_inits
                .iter()
                .copied()
                .filter(|&i| i <= max_jumped)
                .collect();
            if jumps.is_empty() {
                None
            } else {
                let jumpeds: Vec<i64> = jumped_inits
                    .iter()
                    .filter(|&&i| i <= min_jump)
                    .map(|i| i.saturating_add(100))
                    .collect();
                let total: f64 = jumps.iter().chain(&jumpeds).map(|&i| i as f64).sum();
                let n = jumps.len() + jumpeds.len();
                Some((total / n as f64 + 0.5).trunc() as i64)
            }
        }
        _ => None,
    };

    InitiativeEstimate {
        guess,
        lower: max_jumped.map(|i| i.saturating_add(1)),
        upper: min_jump.map(|i| i.saturating_add(99)),
    }
}

pub fn crunch(
    stat_samples: &[f64],
    meat_samples: &[f64],
    jumps: &[InitiativeSample],
    jumpeds: &[InitiativeSample],
) -> MonsterStats {
    let average_stat = mean(stat_samples);
    let level = (average_stat * 4.0).trunc() as i64;

    let jump_inits: Vec<i64> = jumps.iter().map(|s| adjusted_initiative(s, level)).collect();
    let jumped_inits: Vec<i64> = jumpeds.iter().map(|s| adjusted_initiative(s, level)).collect();
    let initiative = reconcile_initiative(&jump_inits, &jumped_inits);

    MonsterStats {
        stat_samples: sorted(stat_samples),
        average_stat,
        level,
        meat_samples: sorted(meat_samples),
        average_meat: mean(meat_samples),
        jump_inits,
        jumped_inits,
        initiative,
    }
}
