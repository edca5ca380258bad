//! Core functionalities: capture-window ingestion, decode records.

pub mod capture;
pub mod records;

pub use capture::{parse_export, parse_line, CaptureError, CaptureWindow};
pub use records::{DecodeRecord, RecordStore};
