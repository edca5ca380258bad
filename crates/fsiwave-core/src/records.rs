use fsiwave_decode::{DecodeError, DecodedFrame};

use crate::capture::CaptureWindow;

/// Outcome of decoding one capture window.
#[derive(Debug, Clone)]
pub struct DecodeRecord {
    pub window: CaptureWindow,
    pub outcome: Result<DecodedFrame, DecodeError>,
}

/// Bounded history of decode outcomes, oldest first.
pub struct RecordStore {
    entries: Vec<DecodeRecord>,
    max_entries: usize,
    show_accepted: bool,
    show_rejected: bool,
}

impl RecordStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
            show_accepted: true,
            show_rejected: true,
        }
    }

    pub fn set_filter(&mut self, show_accepted: bool, show_rejected: bool) {
        self.show_accepted = show_accepted;
        self.show_rejected = show_rejected;
    }

    pub fn push(&mut self, window: CaptureWindow, outcome: Result<DecodedFrame, DecodeError>) {
        self.entries.push(DecodeRecord { window, outcome });
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[DecodeRecord] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn accepted(&self) -> usize {
        self.entries.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn rejected(&self) -> usize {
        self.entries.len() - self.accepted()
    }

    /// Render the (filtered) history as display text, one record per line.
    pub fn to_text(&self, show_timestamps: bool) -> String {
        let mut result = String::new();
        for record in &self.entries {
            match &record.outcome {
                Ok(_) if !self.show_accepted => continue,
                Err(_) if !self.show_rejected => continue,
                _ => {}
            }

            if show_timestamps {
                let span = record.window.span;
                result.push_str(&format!("[{:.6}-{:.6}] ", span.start_s, span.end_s));
            }

            match &record.outcome {
                Ok(frame) => result.push_str(&frame.to_string()),
                Err(err) => {
                    result.push_str("rejected: ");
                    result.push_str(&err.to_string());
                    result.push_str(" | bytes:");
                    for byte in &record.window.bytes {
                        result.push_str(&format!(" {byte:02X}"));
                    }
                }
            }
            result.push('\n');
        }
        result
    }
}
