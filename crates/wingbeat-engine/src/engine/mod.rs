//! Generation orchestration and the collaborator seams.
//!
//! - [`GenerationSession`] - one generation's evaluation loop
//! - [`SimConfig`] - tunable constants for physics, field, and rewards
//! - [`GapSampler`] / [`GapSeed`] - seeded random pipe-gap draws
//! - [`DecisionPolicy`] / [`RenderSink`] / [`StopSignal`] - capability
//!   contracts for the external collaborators
//! - [`FrameState`] - read-only drawable snapshot emitted each tick

pub use self::{collaborator::*, frame::*, gap_sampler::*, generation::*, sim_config::*};

mod collaborator;
mod frame;
mod gap_sampler;
mod generation;
mod sim_config;
