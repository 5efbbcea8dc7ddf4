//! Frame driver for the keyfall visualizer.
//!
//! The host render loop samples the transport clock once per frame and calls
//! [`Visualizer::tick`]; everything returned in the [`FrameSnapshot`] is ready
//! for draw submission. Pure layout, activation and effect logic lives in
//! `keyfall-core`.

mod emit;
mod frame;

pub use emit::EmitStats;
pub use frame::{FrameSnapshot, KeyHighlight, Visualizer};
