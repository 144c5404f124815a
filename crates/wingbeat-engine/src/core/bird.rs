use crate::{core::rect::Rect, engine::SimConfig};

/// Ticks each wing-flap animation frame is held for.
const ANIMATION_TICKS: u32 = 5;

/// Tilt at or below which the bird is rendered in the mid-flap glide
/// frame instead of cycling.
const GLIDE_TILT: f32 = -80.0;

/// A single simulated bird.
///
/// The horizontal position is fixed for the whole generation; only the
/// vertical position changes. Vertical velocity is not integrated
/// directly: displacement is recomputed each tick from the velocity set
/// by the last flap and the number of ticks elapsed since it.
#[derive(Debug, Clone)]
pub struct Bird {
    x: f32,
    y: f32,
    velocity: f32,
    ticks_since_flap: u32,
    flap_ref_y: f32,
    tilt: f32,
    animation_counter: u32,
}

impl Bird {
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.bird_start_y,
            velocity: 0.0,
            ticks_since_flap: 0,
            flap_ref_y: config.bird_start_y,
            tilt: 0.0,
            animation_counter: 0,
        }
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    /// Applies an upward impulse.
    ///
    /// Sets the velocity to the configured flap velocity, restarts the
    /// tick counter, and records the current height as the reference for
    /// the tilt rule. Calling this more than once in a tick is harmless;
    /// the last call wins.
    pub fn flap(&mut self, config: &SimConfig) {
        self.velocity = config.flap_velocity;
        self.ticks_since_flap = 0;
        self.flap_ref_y = self.y;
    }

    /// Advances one tick of vertical kinematics, tilt, and animation.
    ///
    /// Displacement follows `v·t + ½·a·t²` with `t` the ticks since the
    /// last flap, clamped to `max_fall_per_tick` downward. Negative
    /// (upward) displacement gets an extra `rise_boost` subtracted,
    /// giving the arc a snappier rise than the raw parabola.
    #[expect(clippy::cast_precision_loss)]
    pub fn advance_tick(&mut self, config: &SimConfig) {
        self.ticks_since_flap += 1;
        let t = self.ticks_since_flap as f32;

        let mut displacement = self.velocity * t + 0.5 * config.fall_accel * t * t;
        if displacement >= config.max_fall_per_tick {
            displacement = config.max_fall_per_tick;
        }
        if displacement < 0.0 {
            displacement -= config.rise_boost;
        }
        self.y += displacement;

        // Nose up while rising or still near the last flap height,
        // otherwise rotate toward the dive angle.
        if displacement < 0.0 || self.y < self.flap_ref_y + config.tilt_hold_margin {
            if self.tilt < config.max_tilt {
                self.tilt = config.max_tilt;
            }
        } else {
            self.tilt = (self.tilt - config.tilt_down_rate).max(config.min_tilt);
        }

        self.animation_counter = (self.animation_counter + 1) % (ANIMATION_TICKS * 4);
    }

    /// Index of the sprite frame to draw (0, 1, 2, 1 cycle).
    ///
    /// A steeply diving bird holds the mid-flap frame.
    #[must_use]
    pub fn frame_index(&self) -> usize {
        if self.tilt <= GLIDE_TILT {
            return 1;
        }
        match self.animation_counter / ANIMATION_TICKS {
            0 => 0,
            1 => 1,
            2 => 2,
            _ => 1,
        }
    }

    /// Bounding box used for collision queries.
    #[must_use]
    pub fn rect(&self, config: &SimConfig) -> Rect {
        Rect::new(self.x, self.y, config.bird_width, config.bird_height)
    }

    /// True when the bird has hit the floor plane or left the top of the
    /// field.
    #[must_use]
    pub fn is_out_of_bounds(&self, config: &SimConfig) -> bool {
        self.y + config.bird_height >= config.floor_y || self.y < 0.0
    }

    #[cfg(test)]
    pub(crate) fn set_y(&mut self, y: f32) {
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_without_flap_falls_by_exact_parabola_term() {
        let config = SimConfig::default();
        let mut bird = Bird::new(&config);
        let start = bird.y();

        bird.advance_tick(&config);

        // v=0, t=1: 0·1 + 1.5·1² = 1.5, below the clamp, not negative.
        assert!((bird.y() - (start + 1.5)).abs() < f32::EPSILON);
    }

    #[test]
    fn flap_then_advance_moves_upward_and_tilts_up() {
        let config = SimConfig::default();
        let mut bird = Bird::new(&config);
        let start = bird.y();

        bird.flap(&config);
        bird.advance_tick(&config);

        // t=1: -10.5 + 1.5 = -9, minus the 2-unit rise boost.
        assert!(bird.y() < start);
        assert!((bird.y() - (start - 11.0)).abs() < 1e-4);
        assert!((bird.tilt() - config.max_tilt).abs() < f32::EPSILON);
    }

    #[test]
    fn displacement_is_clamped_for_long_falls() {
        let config = SimConfig::default();
        let mut bird = Bird::new(&config);

        let mut prev = bird.y();
        for _ in 0..200 {
            bird.advance_tick(&config);
            let displacement = bird.y() - prev;
            assert!(displacement <= config.max_fall_per_tick + f32::EPSILON);
            prev = bird.y();
        }
    }

    #[test]
    fn tilt_stays_within_bounds() {
        let config = SimConfig::default();
        let mut bird = Bird::new(&config);

        for i in 0..500 {
            if i % 37 == 0 {
                bird.flap(&config);
            }
            bird.advance_tick(&config);
            assert!(bird.tilt() >= config.min_tilt);
            assert!(bird.tilt() <= config.max_tilt);
        }
    }

    #[test]
    fn long_fall_reaches_full_dive_tilt() {
        let config = SimConfig::default();
        let mut bird = Bird::new(&config);

        for _ in 0..100 {
            bird.advance_tick(&config);
        }
        assert!((bird.tilt() - config.min_tilt).abs() < f32::EPSILON);
        // A diving bird holds the glide frame.
        assert_eq!(bird.frame_index(), 1);
    }

    #[test]
    fn horizontal_position_never_changes() {
        let config = SimConfig::default();
        let mut bird = Bird::new(&config);

        for _ in 0..50 {
            bird.flap(&config);
            bird.advance_tick(&config);
        }
        assert!((bird.x() - config.bird_x).abs() < f32::EPSILON);
    }

    #[test]
    fn boundary_check_triggers_below_floor_and_above_ceiling() {
        let config = SimConfig::default();
        let mut bird = Bird::new(&config);

        assert!(!bird.is_out_of_bounds(&config));
        bird.set_y(config.floor_y - config.bird_height);
        assert!(bird.is_out_of_bounds(&config));
        bird.set_y(-1.0);
        assert!(bird.is_out_of_bounds(&config));
    }

    #[test]
    fn animation_cycles_through_flap_frames() {
        let config = SimConfig::default();
        let mut bird = Bird::new(&config);

        let mut seen = Vec::new();
        for _ in 0..(ANIMATION_TICKS * 4) {
            // Keep the bird out of the dive so the cycle is visible.
            bird.flap(&config);
            bird.advance_tick(&config);
            seen.push(bird.frame_index());
        }
        assert!(seen.contains(&0));
        assert!(seen.contains(&1));
        assert!(seen.contains(&2));
    }
}
