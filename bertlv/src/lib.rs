//! BER-TLV decoding and report rendering
//!
//! This crate decodes byte buffers encoded in the BER-TLV (Basic Encoding
//! Rules, Tag-Length-Value) convention, as found in smart-card and EMV-style
//! data streams, and renders the decoded sequence as an indented text report
//! that reflects the nesting of constructed objects.
//!
//! Two layers are provided:
//!
//! - [`decode_one`]: decodes exactly one TLV object header from a byte
//!   window, validating it against the remaining buffer size. The produced
//!   [`TlvObject`] references the value bytes, it never copies them.
//! - [`render_all`]: walks a whole buffer object by object, tracking the
//!   nesting of constructed objects with a bounded depth stack, and
//!   accumulates the indented report.
//!
//! Filler bytes (`0x00` / `0xFF`) between top-level objects are skipped;
//! malformed encodings stop the walk with a structured error rather than
//! being resynchronized past.

pub mod error;
pub mod tlv;

pub use error::{TlvError, TlvResult};
pub use tlv::{DepthStack, MAX_DEPTH, Report, TagClass, TlvObject, decode_one, render_all};
