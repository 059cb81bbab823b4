use rand::Rng;

use super::Color;

/// Re-rolls a random opaque color once per period.
///
/// Feed it frame deltas; it fires on the tick where the accumulated time
/// reaches or crosses the period, then starts accumulating from zero again.
/// A long stall rolls once, it does not replay missed periods.
#[derive(Debug, Clone)]
pub struct ColorPulse {
    period: f32,
    accumulated: f32,
}

impl ColorPulse {
    pub fn new(period_seconds: f32) -> Self {
        debug_assert!(period_seconds > 0.0);
        Self {
            period: period_seconds,
            accumulated: 0.0,
        }
    }

    /// Accumulates one frame delta; returns the new color on the firing tick.
    pub fn tick(&mut self, dt: f32) -> Option<Color> {
        self.accumulated += dt;
        if self.accumulated < self.period {
            return None;
        }
        self.accumulated = 0.0;

        let mut rng = rand::rng();
        Some(Color::new(
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
            1.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_the_tick_that_crosses_the_period() {
        let mut pulse = ColorPulse::new(1.0);
        assert!(pulse.tick(0.4).is_none());
        assert!(pulse.tick(0.4).is_none());
        assert!(pulse.tick(0.4).is_some());
    }

    #[test]
    fn accumulator_restarts_after_firing() {
        let mut pulse = ColorPulse::new(1.0);
        assert!(pulse.tick(1.2).is_some());
        assert!(pulse.tick(0.4).is_none());
        assert!(pulse.tick(0.4).is_none());
        assert!(pulse.tick(0.4).is_some());
    }

    #[test]
    fn exact_boundary_counts_as_crossed() {
        let mut pulse = ColorPulse::new(1.0);
        assert!(pulse.tick(0.5).is_none());
        assert!(pulse.tick(0.5).is_some());
    }

    #[test]
    fn rolled_color_is_opaque_with_unit_range_channels() {
        let mut pulse = ColorPulse::new(0.1);
        let color = pulse.tick(1.0).unwrap();
        assert_eq!(color.a, 1.0);
        for channel in [color.r, color.g, color.b] {
            assert!((0.0..1.0).contains(&channel));
        }
    }
}
