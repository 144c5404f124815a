use crate::engine::SimConfig;

/// The scrolling ground strip.
///
/// Two segments cycle leftward to fake continuous motion; the offsets are
/// cosmetic, but the constant `y` is the lower death plane used by the
/// boundary check.
#[derive(Debug, Clone)]
pub struct Floor {
    y: f32,
    x1: f32,
    x2: f32,
}

impl Floor {
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            y: config.floor_y,
            x1: 0.0,
            x2: config.floor_segment_width,
        }
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn x1(&self) -> f32 {
        self.x1
    }

    #[must_use]
    pub fn x2(&self) -> f32 {
        self.x2
    }

    /// Scrolls both segments; a segment that leaves the field wraps
    /// around behind the other one.
    pub fn advance_tick(&mut self, config: &SimConfig) {
        let width = config.floor_segment_width;
        self.x1 -= config.scroll_speed;
        self.x2 -= config.scroll_speed;
        if self.x1 + width < 0.0 {
            self.x1 = self.x2 + width;
        }
        if self.x2 + width < 0.0 {
            self.x2 = self.x1 + width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_cycle_without_leaving_a_gap() {
        let config = SimConfig::default();
        let mut floor = Floor::new(&config);
        let width = config.floor_segment_width;

        for _ in 0..2000 {
            floor.advance_tick(&config);
            // At least one segment always covers the field origin.
            let covers = |x: f32| x <= 0.0 && x + width > 0.0 || x > 0.0;
            assert!(covers(floor.x1()) || covers(floor.x2()));
            assert!(floor.x1() + width >= 0.0);
            assert!(floor.x2() + width >= 0.0);
        }
    }

    #[test]
    fn death_plane_height_is_constant() {
        let config = SimConfig::default();
        let mut floor = Floor::new(&config);
        for _ in 0..100 {
            floor.advance_tick(&config);
        }
        assert!((floor.y() - config.floor_y).abs() < f32::EPSILON);
    }
}
