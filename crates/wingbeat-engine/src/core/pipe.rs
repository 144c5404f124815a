use crate::{
    core::{bird::Bird, rect::Rect},
    engine::SimConfig,
};

/// A paired top/bottom barrier with a vertical gap.
///
/// The gap is drawn once at construction and never changes; pipes scroll
/// leftward at the configured speed until they leave the field.
#[derive(Debug, Clone)]
pub struct Pipe {
    x: f32,
    gap_top: f32,
    gap_bottom: f32,
    passed: bool,
}

impl Pipe {
    /// Creates a pipe at `x` whose gap starts at `gap_top`.
    ///
    /// The gap bottom is always `gap_top + pipe_gap`.
    #[must_use]
    pub fn new(x: f32, gap_top: f32, config: &SimConfig) -> Self {
        Self {
            x,
            gap_top,
            gap_bottom: gap_top + config.pipe_gap,
            passed: false,
        }
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Lower edge of the top pipe (upper edge of the gap).
    #[must_use]
    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    /// Upper edge of the bottom pipe (lower edge of the gap).
    #[must_use]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_bottom
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Marks this pipe as cleared by the lead bird. Fires once per pipe.
    pub fn mark_passed(&mut self) {
        self.passed = true;
    }

    pub fn advance_tick(&mut self, config: &SimConfig) {
        self.x -= config.scroll_speed;
    }

    /// Bounding box of the top barrier.
    #[must_use]
    pub fn top_rect(&self, config: &SimConfig) -> Rect {
        Rect::new(
            self.x,
            self.gap_top - config.pipe_height,
            config.pipe_width,
            config.pipe_height,
        )
    }

    /// Bounding box of the bottom barrier.
    #[must_use]
    pub fn bottom_rect(&self, config: &SimConfig) -> Rect {
        Rect::new(self.x, self.gap_bottom, config.pipe_width, config.pipe_height)
    }

    /// True when the bird's box overlaps either barrier.
    #[must_use]
    pub fn collides_with(&self, bird: &Bird, config: &SimConfig) -> bool {
        let bird_rect = bird.rect(config);
        bird_rect.intersects(&self.top_rect(config)) || bird_rect.intersects(&self.bottom_rect(config))
    }

    /// True once the pipe has scrolled fully past the left field edge.
    #[must_use]
    pub fn is_off_screen(&self, config: &SimConfig) -> bool {
        self.x + config.pipe_width < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GapSampler, GapSeed};

    #[test]
    fn gap_height_is_constant_for_all_draws() {
        let config = SimConfig::default();
        let mut gaps = GapSampler::with_seed(GapSeed::from_bytes([7; 16]));

        for _ in 0..100 {
            let gap_top = gaps.sample_gap_top(&config);
            let pipe = Pipe::new(config.pipe_spawn_x, gap_top, &config);
            assert!((pipe.gap_bottom() - pipe.gap_top() - config.pipe_gap).abs() < f32::EPSILON);
            assert!(gap_top >= config.gap_top_min);
            assert!(gap_top < config.gap_top_max);
        }
    }

    #[test]
    fn bird_inside_gap_does_not_collide() {
        let config = SimConfig::default();
        let pipe = Pipe::new(config.bird_x, 300.0, &config);
        let mut bird = Bird::new(&config);

        // Centered in the gap: 300..500 with a 48-unit tall bird.
        bird.set_y(380.0);
        assert!(!pipe.collides_with(&bird, &config));
    }

    #[test]
    fn bird_overlapping_top_barrier_collides() {
        let config = SimConfig::default();
        let pipe = Pipe::new(config.bird_x, 300.0, &config);
        let mut bird = Bird::new(&config);

        bird.set_y(260.0); // box 260..308 crosses the gap top at 300
        assert!(pipe.collides_with(&bird, &config));
    }

    #[test]
    fn bird_overlapping_bottom_barrier_collides() {
        let config = SimConfig::default();
        let pipe = Pipe::new(config.bird_x, 300.0, &config);
        let mut bird = Bird::new(&config);

        bird.set_y(480.0); // box 480..528 crosses the gap bottom at 500
        assert!(pipe.collides_with(&bird, &config));
    }

    #[test]
    fn horizontally_distant_pipe_never_collides() {
        let config = SimConfig::default();
        let pipe = Pipe::new(config.pipe_spawn_x, 300.0, &config);
        let mut bird = Bird::new(&config);

        bird.set_y(0.0);
        assert!(!pipe.collides_with(&bird, &config));
    }

    #[test]
    fn pipe_scrolls_left_and_leaves_the_field() {
        let config = SimConfig::default();
        let mut pipe = Pipe::new(0.0, 300.0, &config);

        assert!(!pipe.is_off_screen(&config));
        let ticks_to_exit = (config.pipe_width / config.scroll_speed).ceil() as usize + 1;
        for _ in 0..ticks_to_exit {
            pipe.advance_tick(&config);
        }
        assert!(pipe.is_off_screen(&config));
    }
}
