use crate::engine::FrameState;

/// What one bird sees on one tick.
///
/// Distances are measured to the gap edges of the pipe the lead bird has
/// not yet fully passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// The bird's own vertical position.
    pub bird_y: f32,
    /// Absolute vertical distance to the gap's upper edge.
    pub gap_top_distance: f32,
    /// Absolute vertical distance to the gap's lower edge.
    pub gap_bottom_distance: f32,
}

impl Observation {
    #[must_use]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.bird_y, self.gap_top_distance, self.gap_bottom_distance]
    }
}

/// The decision collaborator: maps an observation to a flap signal.
///
/// Called at most once per bird per tick. Outputs above the configured
/// threshold trigger a flap. The engine assumes well-formed numeric
/// outputs; it does not sanitize them.
pub trait DecisionPolicy {
    fn decide(&mut self, observation: &Observation) -> f32;
}

/// The render collaborator: receives a read-only snapshot each tick.
///
/// Data flows one way; the engine never reads back from the sink.
pub trait RenderSink {
    fn render(&mut self, frame: &FrameState);
}

/// Sink that discards every frame, for headless evaluation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn render(&mut self, _frame: &FrameState) {}
}

/// External cancellation, polled once per tick.
pub trait StopSignal {
    fn poll_stop(&mut self) -> bool;
}

/// Signal that never fires, for headless evaluation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn poll_stop(&mut self) -> bool {
        false
    }
}
