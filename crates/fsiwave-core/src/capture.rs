//! Capture-export ingestion.
//!
//! Windows arrive pre-segmented in a plain text export, one window per
//! line. Nothing here touches a bus: segmenting the signal into candidate
//! windows is the capture hardware's job.

use fsiwave_decode::{RawFrame, TimeSpan};
use thiserror::Error;

/// One pre-segmented byte window from a capture export.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureWindow {
    pub span: TimeSpan,
    pub bytes: Vec<u8>,
}

impl CaptureWindow {
    /// Borrow this window as decoder input.
    pub fn as_raw(&self) -> RawFrame<'_> {
        RawFrame::new(&self.bytes, self.span)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    #[error("line {line}: malformed timestamp '{value}'")]
    BadTimestamp { line: usize, value: String },
    #[error("line {line}: malformed hex bytes: {source}")]
    BadHex {
        line: usize,
        source: hex::FromHexError,
    },
    #[error("line {line}: expected 'start,end,bytes' or bare hex bytes")]
    BadShape { line: usize },
}

/// Parse one export line. Returns `None` for blank lines and `#` comments.
///
/// Accepted shapes:
///
/// ```text
/// start_s,end_s,HEXBYTES
/// HEXBYTES
/// ```
///
/// Hex bytes may be separated by spaces. A line without timestamps gets a
/// zeroed time span.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<CaptureWindow>, CaptureError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    let (span, hex_field) = match fields.as_slice() {
        [bytes] => (
            TimeSpan {
                start_s: 0.0,
                end_s: 0.0,
            },
            *bytes,
        ),
        [start, end, bytes] => {
            let span = TimeSpan {
                start_s: parse_seconds(start, line_no)?,
                end_s: parse_seconds(end, line_no)?,
            };
            (span, *bytes)
        }
        _ => return Err(CaptureError::BadShape { line: line_no }),
    };

    let compact: String = hex_field.split_whitespace().collect();
    let bytes = hex::decode(&compact).map_err(|source| CaptureError::BadHex {
        line: line_no,
        source,
    })?;
    Ok(Some(CaptureWindow { span, bytes }))
}

fn parse_seconds(field: &str, line_no: usize) -> Result<f64, CaptureError> {
    field
        .parse::<f64>()
        .map_err(|_| CaptureError::BadTimestamp {
            line: line_no,
            value: field.to_string(),
        })
}

/// Parse a whole export. Line numbers in errors are 1-based.
pub fn parse_export(text: &str) -> Result<Vec<CaptureWindow>, CaptureError> {
    let mut windows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(window) = parse_line(line, idx + 1)? {
            windows.push(window);
        }
    }
    Ok(windows)
}
