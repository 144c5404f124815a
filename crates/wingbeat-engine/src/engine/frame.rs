use serde::Serialize;

/// Drawable state of one bird.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BirdFrame {
    pub x: f32,
    pub y: f32,
    /// Tilt angle in degrees; positive is nose up.
    pub tilt: f32,
    /// Which wing-flap sprite frame to draw.
    pub frame_index: usize,
}

/// Drawable state of one pipe pair.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PipeFrame {
    pub x: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
}

/// Read-only snapshot of everything needed to draw one frame.
///
/// Emitted once per tick; the renderer never feeds anything back into
/// the simulation.
#[derive(Debug, Clone, Serialize)]
pub struct FrameState {
    pub birds: Vec<BirdFrame>,
    /// Active pipes ordered leftmost first.
    pub pipes: Vec<PipeFrame>,
    pub floor_y: f32,
    pub floor_x1: f32,
    pub floor_x2: f32,
    pub score: u32,
    pub generation: u32,
    pub ticks: u64,
}
