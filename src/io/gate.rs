/// Gate-voltage edge detector with hysteresis.
///
/// Goes high at or above 1 V and re-arms at or below 0 V, so a noisy gate
/// that wobbles around a single level cannot fire twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchmittTrigger {
    high: bool,
    low_threshold: f64,
    high_threshold: f64,
}

impl SchmittTrigger {
    pub fn new(low_threshold: f64, high_threshold: f64) -> Self {
        Self {
            high: false,
            low_threshold,
            high_threshold,
        }
    }

    /// Feed one gate sample; true on the low-to-high transition only.
    pub fn process(&mut self, input: f64) -> bool {
        if self.high {
            if input <= self.low_threshold {
                self.high = false;
            }
            false
        } else if input >= self.high_threshold {
            self.high = true;
            true
        } else {
            false
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn reset(&mut self) {
        self.high = false;
    }
}

impl Default for SchmittTrigger {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_gate() {
        let mut trigger = SchmittTrigger::default();
        let gate = [0.0, 0.5, 1.0, 5.0, 0.5, 1.2, 0.0, 0.0, 2.0];
        let edges: Vec<bool> = gate.iter().map(|&v| trigger.process(v)).collect();
        assert_eq!(
            edges,
            [false, false, true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn reset_rearms() {
        let mut trigger = SchmittTrigger::default();
        assert!(trigger.process(3.0));
        assert!(trigger.is_high());
        trigger.reset();
        assert!(trigger.process(3.0));
    }
}
