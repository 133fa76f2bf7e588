/// Where the body is within one repetition cycle.
///
/// `Home` is the resting pose the cycle starts and ends in (arms extended
/// for a push-up, lying flat for a sit-up, feet together for a jumping
/// jack). `Away` is the far end of the movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Home,
    Away,
}

/// What a signal update did to the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// No transition; the signal is holding or inside the dead zone.
    Hold,
    /// Crossed into the away phase (e.g. reached the bottom half of a
    /// push-up). Never counted as a rep on its own.
    WentAway,
    /// Returned home, completing one full away-then-home cycle. This is
    /// the transition that counts a repetition, so a half-movement that
    /// never returns is never counted.
    Completed,
}

/// Two-threshold hysteresis over a scalar repetition signal.
///
/// A single cutoff would let a body oscillating near it register spurious
/// reps; the dead zone between the two thresholds holds the current phase
/// instead. `away_is_low` selects the orientation: for angle signals the
/// away phase sits below the thresholds (elbow bends down through 90°),
/// for spread signals it sits above them.
#[derive(Debug, Clone)]
pub struct RepCycle {
    away_threshold: f32,
    home_threshold: f32,
    away_is_low: bool,
    phase: CyclePhase,
}

impl RepCycle {
    /// Cycle whose away phase is entered when the signal drops below
    /// `away_threshold` and left when it rises above `home_threshold`.
    pub fn away_below(away_threshold: f32, home_threshold: f32) -> Self {
        debug_assert!(away_threshold < home_threshold);
        Self {
            away_threshold,
            home_threshold,
            away_is_low: true,
            phase: CyclePhase::Home,
        }
    }

    /// Cycle whose away phase is entered when the signal rises above
    /// `away_threshold` and left when it drops below `home_threshold`.
    pub fn away_above(away_threshold: f32, home_threshold: f32) -> Self {
        debug_assert!(away_threshold > home_threshold);
        Self {
            away_threshold,
            home_threshold,
            away_is_low: false,
            phase: CyclePhase::Home,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Phase transitions are a total function of (previous phase, signal).
    pub fn update(&mut self, signal: f32) -> CycleEvent {
        let (toward_away, toward_home) = if self.away_is_low {
            (signal < self.away_threshold, signal > self.home_threshold)
        } else {
            (signal > self.away_threshold, signal < self.home_threshold)
        };

        match self.phase {
            CyclePhase::Home if toward_away => {
                self.phase = CyclePhase::Away;
                CycleEvent::WentAway
            }
            CyclePhase::Away if toward_home => {
                self.phase = CyclePhase::Home;
                CycleEvent::Completed
            }
            _ => CycleEvent::Hold,
        }
    }

    /// Back to the initial phase, as after a session reset.
    pub fn reset(&mut self) {
        self.phase = CyclePhase::Home;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle_completes_once() {
        let mut cycle = RepCycle::away_below(90.0, 160.0);
        assert_eq!(cycle.update(170.0), CycleEvent::Hold);
        assert_eq!(cycle.update(80.0), CycleEvent::WentAway);
        assert_eq!(cycle.update(70.0), CycleEvent::Hold);
        assert_eq!(cycle.update(170.0), CycleEvent::Completed);
        assert_eq!(cycle.phase(), CyclePhase::Home);
    }

    #[test]
    fn test_dead_zone_holds_phase() {
        let mut cycle = RepCycle::away_below(90.0, 160.0);
        // Oscillating inside the dead zone never transitions.
        for signal in [120.0, 100.0, 150.0, 95.0, 159.0] {
            assert_eq!(cycle.update(signal), CycleEvent::Hold);
            assert_eq!(cycle.phase(), CyclePhase::Home);
        }
    }

    #[test]
    fn test_away_above_orientation() {
        let mut cycle = RepCycle::away_above(1.5, 0.9);
        assert_eq!(cycle.update(1.6), CycleEvent::WentAway);
        assert_eq!(cycle.update(1.2), CycleEvent::Hold);
        assert_eq!(cycle.update(0.8), CycleEvent::Completed);
    }

    #[test]
    fn test_reset_returns_home() {
        let mut cycle = RepCycle::away_below(90.0, 160.0);
        cycle.update(80.0);
        assert_eq!(cycle.phase(), CyclePhase::Away);
        cycle.reset();
        assert_eq!(cycle.phase(), CyclePhase::Home);
    }
}
