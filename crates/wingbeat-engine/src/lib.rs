//! Simulation engine for a population of side-scrolling flapping agents.
//!
//! The engine owns the per-generation evaluation loop: bird kinematics,
//! pipe generation and motion, collision detection, elimination, and
//! fitness accounting. It is agnostic to how decisions are produced;
//! callers supply a [`DecisionPolicy`] per bird and read the accumulated
//! fitness totals back when the generation ends.
//!
//! # Example
//!
//! ```
//! use wingbeat_engine::{
//!     DecisionPolicy, GenerationSession, NeverStop, NullRenderSink, Observation, SimConfig,
//! };
//!
//! struct Glider;
//!
//! impl DecisionPolicy for Glider {
//!     fn decide(&mut self, _observation: &Observation) -> f32 {
//!         0.0 // never flap
//!     }
//! }
//!
//! let config = SimConfig::default();
//! let mut session = GenerationSession::new(config, vec![Glider], 0);
//! let outcome = session.run(&mut NeverStop, &mut NullRenderSink);
//! assert!(outcome.is_extinct());
//! assert_eq!(session.final_fitness().len(), 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
