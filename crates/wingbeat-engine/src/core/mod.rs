//! Simulated entities: birds, pipes, the floor, and their geometry.

pub use self::{bird::*, floor::*, pipe::*, rect::*};

mod bird;
mod floor;
mod pipe;
mod rect;
