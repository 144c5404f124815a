use serde::{Deserialize, Serialize};

/// Simulation constants, supplied to the session at construction.
///
/// Defaults reproduce the reference behavior: a 500×800 field scrolling
/// at 5 units/tick, paced at 30 ticks per second. Distances are in field
/// units (reference sprite pixels), times in ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Field width; pipes spawn to the right of it.
    pub field_width: f32,
    /// Field height; the floor strip sits inside it.
    pub field_height: f32,

    /// Fixed horizontal bird position.
    pub bird_x: f32,
    /// Vertical position all birds start at.
    pub bird_start_y: f32,
    /// Bird sprite-box width.
    pub bird_width: f32,
    /// Bird sprite-box height.
    pub bird_height: f32,

    /// Velocity set by a flap; negative is upward.
    pub flap_velocity: f32,
    /// Per-tick downward acceleration (the `a` in `v·t + ½·a·t²`).
    pub fall_accel: f32,
    /// Maximum downward displacement in one tick.
    pub max_fall_per_tick: f32,
    /// Extra units subtracted while displacement is negative.
    pub rise_boost: f32,

    /// Upper tilt bound, degrees.
    pub max_tilt: f32,
    /// Lower tilt bound, degrees.
    pub min_tilt: f32,
    /// Degrees of nose-down rotation per falling tick.
    pub tilt_down_rate: f32,
    /// The bird keeps its nose up while within this many units below the
    /// height of its last flap.
    pub tilt_hold_margin: f32,

    /// Pipe sprite-box width.
    pub pipe_width: f32,
    /// Height of each barrier half.
    pub pipe_height: f32,
    /// Vertical gap between the barrier halves.
    pub pipe_gap: f32,
    /// X position new pipes spawn at.
    pub pipe_spawn_x: f32,
    /// Inclusive lower bound of the gap-top draw.
    pub gap_top_min: f32,
    /// Exclusive upper bound of the gap-top draw.
    pub gap_top_max: f32,

    /// Y of the lower death plane.
    pub floor_y: f32,
    /// Width of one cosmetic floor segment.
    pub floor_segment_width: f32,
    /// Leftward speed shared by pipes and the floor.
    pub scroll_speed: f32,

    /// Simulation pacing in ticks per second; consumed by the render
    /// loop, not by the engine itself.
    pub tick_rate: f64,
    /// Optional cap on ticks per generation; reaching it ends the
    /// generation as [`SessionState::Stopped`](crate::SessionState).
    pub tick_budget: Option<u64>,

    /// Fitness added to every live bird each tick.
    pub survival_reward: f32,
    /// Fitness added to every surviving bird when a pipe is cleared.
    pub clearance_reward: f32,
    /// Fitness removed from a bird that hits a pipe.
    pub collision_penalty: f32,
    /// Decision outputs above this trigger a flap.
    pub flap_threshold: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: 500.0,
            field_height: 800.0,

            bird_x: 230.0,
            bird_start_y: 350.0,
            bird_width: 68.0,
            bird_height: 48.0,

            flap_velocity: -10.5,
            fall_accel: 3.0,
            max_fall_per_tick: 16.0,
            rise_boost: 2.0,

            max_tilt: 25.0,
            min_tilt: -90.0,
            tilt_down_rate: 20.0,
            tilt_hold_margin: 50.0,

            pipe_width: 104.0,
            pipe_height: 640.0,
            pipe_gap: 200.0,
            pipe_spawn_x: 600.0,
            gap_top_min: 50.0,
            gap_top_max: 450.0,

            floor_y: 730.0,
            floor_segment_width: 672.0,
            scroll_speed: 5.0,

            tick_rate: 30.0,
            tick_budget: None,

            survival_reward: 0.1,
            clearance_reward: 5.0,
            collision_penalty: 1.0,
            flap_threshold: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let config = SimConfig {
            tick_budget: Some(9000),
            ..SimConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tick_budget, Some(9000));
        assert!((back.flap_velocity - config.flap_velocity).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SimConfig = serde_json::from_str("{}").unwrap();
        assert!((config.pipe_gap - 200.0).abs() < f32::EPSILON);
        assert!(config.tick_budget.is_none());
    }
}
