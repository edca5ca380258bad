//! Decoders for pre-segmented FSI bus capture windows.

pub mod fsi;

pub use fsi::{decode, DecodeError, DecodedFrame, FrameType, RawFrame};

use serde::Serialize;

/// Start/end timestamps of a captured byte window, in seconds.
///
/// The decoder treats these as opaque: they are copied onto the decoded
/// frame without being interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSpan {
    pub start_s: f64,
    pub end_s: f64,
}
