//! Feed-forward decision policies for the flock simulation.
//!
//! A policy is a tiny fully-connected network whose weights live in a
//! flat genome vector, which is what the training crate breeds.

pub use self::network::*;

mod network;
