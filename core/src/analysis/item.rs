use serde::Serialize;

/// Drop tally for one item of one monster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Item {
    pub found: u32,
    pub stolen: u32,
    pub misc: u32,
    /// Stolen during a fight that was won: the drop could not be observed.
    pub prevented: u32,
    /// Sum of `1 / item divisor` over every normal drop.
    pub rate_sum: f64,
}

impl Item {
    pub fn record_drop(&mut self, inverse_rate: f64) {
        self.found += 1;
        self.rate_sum += inverse_rate;
    }

    pub fn record_steal(&mut self, won: bool) {
        self.stolen += 1;
        if won {
            self.prevented += 1;
        }
    }

    pub fn record_misc(&mut self) {
        self.misc += 1;
    }

    /// Base drop rate, corrected for item bonuses and for trials lost to
    /// theft. `None` when no fight could have shown a drop.
    pub fn drop_rate(&self, defeated: u32) -> Option<f64> {
        let trials = i64::from(defeated) - i64::from(self.prevented);
        if trials <= 0 {
            None
        } else if i64::from(self.found) == trials {
            Some(1.0)
        } else {
            Some(self.rate_sum / trials as f64)
        }
    }
}
