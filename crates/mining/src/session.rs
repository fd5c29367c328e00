//! Tick-by-tick accumulation of break progress.

use toolcraft_core::SimTick;

/// Ticks needed to break a block at `damage` per tick.
///
/// Returns `None` when the block never breaks.
pub fn ticks_to_break(damage: f64) -> Option<u32> {
    if damage.is_nan() || damage <= 0.0 {
        return None;
    }
    if damage >= 1.0 {
        return Some(1);
    }
    let ticks = (1.0 / damage).ceil();
    if ticks >= f64::from(u32::MAX) {
        return Some(u32::MAX);
    }
    Some(ticks as u32)
}

/// Result of advancing a [`BreakSession`] by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakStatus {
    /// Still breaking; carries the progress so far.
    InProgress(f64),
    /// The block broke on this tick.
    Broken,
}

/// A player continuously breaking one block.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakSession {
    started: SimTick,
    damage_per_tick: f64,
    elapsed: u32,
}

impl BreakSession {
    /// Start breaking at `started` with a fixed damage per tick.
    pub fn new(started: SimTick, damage_per_tick: f64) -> Self {
        Self {
            started,
            damage_per_tick: damage_per_tick.max(0.0),
            elapsed: 0,
        }
    }

    /// Tick the session started on.
    pub fn started(&self) -> SimTick {
        self.started
    }

    /// Damage applied each tick.
    pub fn damage_per_tick(&self) -> f64 {
        self.damage_per_tick
    }

    /// Ticks spent breaking so far.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Current tick of the session.
    pub fn current_tick(&self) -> SimTick {
        self.started.advance(u64::from(self.elapsed))
    }

    /// Accumulated progress, capped at 1.0.
    pub fn progress(&self) -> f64 {
        (self.damage_per_tick * f64::from(self.elapsed)).min(1.0)
    }

    /// Whether the block has broken.
    pub fn is_broken(&self) -> bool {
        ticks_to_break(self.damage_per_tick).is_some_and(|needed| self.elapsed >= needed)
    }

    /// Apply one more tick of damage.
    pub fn tick(&mut self) -> BreakStatus {
        if !self.is_broken() {
            self.elapsed = self.elapsed.saturating_add(1);
        }
        if self.is_broken() {
            BreakStatus::Broken
        } else {
            BreakStatus::InProgress(self.progress())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_to_break_rounds_up() {
        assert_eq!(ticks_to_break(0.25), Some(4));
        assert_eq!(ticks_to_break(0.3), Some(4));
        assert_eq!(ticks_to_break(1.0), Some(1));
        assert_eq!(ticks_to_break(3.0), Some(1));
        assert_eq!(ticks_to_break(0.0), None);
        assert_eq!(ticks_to_break(-1.0), None);
        assert_eq!(ticks_to_break(f64::NAN), None);
    }

    #[test]
    fn session_breaks_after_enough_ticks() {
        let mut session = BreakSession::new(SimTick(100), 0.25);
        assert_eq!(session.tick(), BreakStatus::InProgress(0.25));
        assert_eq!(session.tick(), BreakStatus::InProgress(0.5));
        assert_eq!(session.tick(), BreakStatus::InProgress(0.75));
        assert_eq!(session.tick(), BreakStatus::Broken);
        assert_eq!(session.progress(), 1.0);
        assert_eq!(session.current_tick(), SimTick(104));

        // Further ticks do nothing.
        assert_eq!(session.tick(), BreakStatus::Broken);
        assert_eq!(session.elapsed(), 4);
    }

    #[test]
    fn zero_damage_never_breaks() {
        let mut session = BreakSession::new(SimTick::ZERO, 0.0);
        for _ in 0..1000 {
            assert_eq!(session.tick(), BreakStatus::InProgress(0.0));
        }
        assert!(!session.is_broken());
    }

    #[test]
    fn instant_damage_breaks_on_first_tick() {
        let mut session = BreakSession::new(SimTick::ZERO, 1.0);
        assert!(!session.is_broken());
        assert_eq!(session.tick(), BreakStatus::Broken);
    }
}
