//! BER-TLV decoder and report renderer
//!
//! Each BER-TLV object is a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag encoding
//!
//! The first tag byte carries the object metadata:
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//!
//! - CC = class (00 = Universal, 01 = Application, 10 = Context-specific,
//!   11 = Private)
//! - P = primitive (0) or constructed (1)
//! - TTTTT = tag number; all five bits set (`0x1F`) announces a second tag
//!   byte, which is packed big-endian below the first
//!
//! ## Length encoding
//!
//! - **Short form** (1 byte): bit 7 = 0, bits 6-0 = value length (0-127)
//! - **Long form**: first byte has bit 7 = 1 and bits 6-0 give the number of
//!   subsequent bytes that encode the value length big-endian
//!
//! ## Value encoding
//!
//! - **Primitive** objects carry raw data
//! - **Constructed** objects carry a sequence of nested TLV triplets
//!
//! The walker in [`render`] does not recurse into constructed objects; it
//! stays flat over the buffer and uses a bounded [`DepthStack`] purely to
//! account for when each enclosing object's byte budget is exhausted. That
//! is enough to know the indentation depth and when garbage skipping between
//! top-level objects may resume, without building a tree.
//!
//! Filler bytes (`0x00` / `0xFF`) are permitted before, between and after
//! top-level objects and are skipped whenever the cursor is not inside an
//! open constructed object.

pub mod decoder;
pub mod render;
pub mod types;

pub use decoder::decode_one;
pub use render::{Report, render_all};
pub use types::{DepthStack, MAX_DEPTH, TagClass, TlvObject};
