//! FSI frame decoder.
//!
//! A frame occupies one capture window, already segmented by the capture
//! layer:
//!
//! ```text
//! byte 0        byte 1            byte 2      bytes 3..3+N   3+N   3+N+1         3+N+2
//! [pre|SOF]     [type|reserved]   user data   data words     CRC   [tag|EOF]     [post|....]
//!  4b   4b       3b     5b                    N x 8 bits           4b   4b        4b
//! ```
//!
//! Non-Ping frames carry a variable number of data words with no explicit
//! length field; the count is derived from the total window length. The CRC
//! byte is extracted as-is, never recomputed.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::TimeSpan;

const PREAMBLE: u8 = 0xF;
const SOF_MARKER: u8 = 0x9;
const EOF_MARKER: u8 = 0b0110;
const POSTAMBLE: u8 = 0xF;

/// Bytes present in every frame: header (2), user data (1), CRC (1),
/// frame-tag/EOF (1), postamble (1).
const FIXED_OVERHEAD: usize = 6;
/// Shortest decodable window; equal to the fixed overhead since a Ping
/// frame carries no data words.
const MIN_FRAME_LEN: usize = 6;

/// Frame type selected by the 3-bit code in the header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameType {
    Ping,
    Data,
    Ack,
    Nak,
    /// Codes `0b100..=0b111` are carried through rather than rejected.
    Unknown(u8),
}

impl FrameType {
    pub fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0b000 => FrameType::Ping,
            0b001 => FrameType::Data,
            0b010 => FrameType::Ack,
            0b011 => FrameType::Nak,
            other => FrameType::Unknown(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            FrameType::Ping => 0b000,
            FrameType::Data => 0b001,
            FrameType::Ack => 0b010,
            FrameType::Nak => 0b011,
            FrameType::Unknown(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrameType::Ping => "Ping",
            FrameType::Data => "Data",
            FrameType::Ack => "ACK",
            FrameType::Nak => "NAK",
            FrameType::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameType::Unknown(code) => write!(f, "Unknown({code:#05b})"),
            other => f.write_str(other.label()),
        }
    }
}

/// One candidate frame window as handed over by the capture layer.
///
/// The window data stays owned by the caller; the decoder only reads it.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    pub data: &'a [u8],
    pub span: TimeSpan,
}

impl<'a> RawFrame<'a> {
    pub fn new(data: &'a [u8], span: TimeSpan) -> Self {
        Self { data, span }
    }
}

/// Why a window was declined.
///
/// Rejection is the normal outcome for non-frame input, not a fault; the
/// caller decides whether to skip, realign or surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("window of {0} bytes is shorter than the 6-byte minimum")]
    TooShort(usize),
    #[error("window length inconsistent with the fixed frame overhead")]
    NegativeDataLength,
    #[error("preamble nibble {0:#x}, expected 0xf")]
    BadPreamble(u8),
    #[error("start-of-frame nibble {0:#x}, expected 0x9")]
    BadStartMarker(u8),
    #[error("end-of-frame nibble {0:#06b}, expected 0b0110")]
    BadEndMarker(u8),
    #[error("postamble nibble {0:#x}, expected 0xf")]
    BadPostamble(u8),
}

/// A fully validated FSI frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFrame {
    pub frame_type: FrameType,
    pub user_data: u8,
    /// Empty for Ping frames.
    pub data_words: Vec<u8>,
    /// Checksum byte as carried on the bus, not recomputed.
    pub crc: u8,
    /// 4-bit tag, upper nibble zero.
    pub frame_tag: u8,
    pub span: TimeSpan,
}

impl fmt::Display for DecodedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FSI Frame | Type: {} | User Data: {:#04x} | Data Words: ",
            self.frame_type, self.user_data
        )?;
        if self.data_words.is_empty() {
            f.write_str("None")?;
        } else {
            for (i, word) in self.data_words.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{word:#04x}")?;
            }
        }
        write!(f, " | CRC: {:#04x} | Frame Tag: {:#x}", self.crc, self.frame_tag)
    }
}

/// Decode one capture window as a single FSI frame.
///
/// Stateless and single-pass: the result depends only on the given window,
/// and a `DecodedFrame` is returned only when every structural check
/// passes. The window's time span is carried through unchanged.
pub fn decode(raw: &RawFrame<'_>) -> Result<DecodedFrame, DecodeError> {
    let data = raw.data;
    if data.len() < MIN_FRAME_LEN {
        return Err(DecodeError::TooShort(data.len()));
    }

    let preamble = data[0] >> 4;
    let sof = data[0] & 0x0F;
    // Bits 4..0 of the header byte are reserved and not validated.
    let frame_type = FrameType::from_code(data[1] >> 5);
    let user_data = data[2];

    // A Ping frame never carries data words; for everything else the count
    // falls out of the window length, since the format has exactly one
    // variable-length region and no explicit length field.
    let num_words = if frame_type == FrameType::Ping {
        0
    } else {
        data.len()
            .checked_sub(FIXED_OVERHEAD)
            .ok_or(DecodeError::NegativeDataLength)?
    };
    let crc_at = 3 + num_words;

    let crc = data[crc_at];
    let frame_tag = data[crc_at + 1] >> 4;
    let eof = data[crc_at + 1] & 0x0F;
    let postamble = data[crc_at + 2] >> 4;

    if preamble != PREAMBLE {
        return Err(DecodeError::BadPreamble(preamble));
    }
    if sof != SOF_MARKER {
        return Err(DecodeError::BadStartMarker(sof));
    }
    if eof != EOF_MARKER {
        return Err(DecodeError::BadEndMarker(eof));
    }
    if postamble != POSTAMBLE {
        return Err(DecodeError::BadPostamble(postamble));
    }

    Ok(DecodedFrame {
        frame_type,
        user_data,
        data_words: data[3..crc_at].to_vec(),
        crc,
        frame_tag,
        span: raw.span,
    })
}
