//! BER-TLV types (tag class, object descriptor, depth stack)

use std::fmt;

use crate::error::{TlvError, TlvResult};

/// Maximum supported nesting depth for constructed objects.
///
/// Walks that nest deeper fail with [`TlvError::DepthExceeded`]; the limit
/// is a hard bound of the depth accounting, not a heuristic.
pub const MAX_DEPTH: usize = 5;

/// BER tag class
///
/// Taken from bits 7-6 of the first tag byte:
/// - **Universal**: standard ASN.1 types
/// - **Application**: application-specific types
/// - **Context-specific**: context-dependent types
/// - **Private**: implementation-specific types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl TagClass {
    /// Extract the tag class from the first tag byte.
    ///
    /// The first byte carries the class bits in both one- and two-byte tag
    /// encodings.
    pub fn from_tag_byte(byte: u8) -> Self {
        match (byte >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    /// Class name as it appears in the rendered report.
    pub fn name(&self) -> &'static str {
        match self {
            TagClass::Universal => "universal class",
            TagClass::Application => "application class",
            TagClass::ContextSpecific => "context-specific class",
            TagClass::Private => "private class",
        }
    }
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded BER-TLV object
///
/// A transient descriptor produced by [`decode_one`](crate::decode_one). It
/// borrows the source buffer: `value` points at the value field, nothing is
/// copied, and the descriptor cannot outlive the buffer slice it was decoded
/// from.
///
/// All offsets are relative to the slice handed to the decoder, so they
/// include any garbage bytes skipped in front of the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvObject<'a> {
    /// Raw tag bytes, big-endian packed (1 or 2 bytes)
    pub tag: u16,
    /// Size of the tag field in bytes (1 or 2)
    pub tag_size: usize,
    /// Size of the length field in bytes (>= 1)
    pub length_size: usize,
    /// Declared size of the value field in bytes (0 is legal)
    pub value_length: usize,
    /// Offset where the value field begins, just past the length field
    pub value_offset: usize,
    /// The value bytes, referenced from the source buffer
    pub value: &'a [u8],
    /// Tag class from bits 7-6 of the first tag byte
    pub class: TagClass,
    /// Constructed (true) or primitive (false), bit 5 of the first tag byte
    pub constructed: bool,
}

impl TlvObject<'_> {
    /// Header size: tag field plus length field.
    pub fn header_size(&self) -> usize {
        self.tag_size + self.length_size
    }

    /// Full encoded size: header plus declared value length.
    pub fn total_size(&self) -> usize {
        self.header_size() + self.value_length
    }

    /// Object type name as it appears in the rendered report.
    pub fn type_name(&self) -> &'static str {
        if self.constructed { "constructed" } else { "primitive" }
    }
}

/// Bounded stack of open constructed-object byte budgets
///
/// Each entry holds the number of value bytes still to be consumed before
/// the constructed object at that nesting depth is closed. The stack always
/// reflects exactly the ancestors still open: an entry is pushed when a
/// constructed object is entered and removed precisely when its budget
/// reaches zero.
///
/// The capacity is fixed at [`MAX_DEPTH`]; `push` is checked and reports
/// [`TlvError::DepthExceeded`] instead of writing past the bound.
#[derive(Debug, Clone, Default)]
pub struct DepthStack {
    entries: [usize; MAX_DEPTH],
    depth: usize,
}

impl DepthStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth (number of open constructed objects).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True when no constructed object is open.
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Open a new nesting level with the given byte budget.
    pub fn push(&mut self, value_length: usize) -> TlvResult<()> {
        if self.depth == MAX_DEPTH {
            return Err(TlvError::DepthExceeded { max: MAX_DEPTH });
        }
        self.entries[self.depth] = value_length;
        self.depth += 1;
        Ok(())
    }

    /// Charge `size` bytes against the innermost open object.
    ///
    /// Pops the entry when its budget reaches zero and returns whether a
    /// pop happened. Charging an empty stack is a no-op. The subtraction
    /// saturates so that inconsistent member sizes in malformed input leave
    /// the entry at zero instead of wrapping.
    pub fn charge(&mut self, size: usize) -> bool {
        if self.depth == 0 {
            return false;
        }
        let top = &mut self.entries[self.depth - 1];
        *top = top.saturating_sub(size);
        if *top == 0 {
            self.depth -= 1;
            true
        } else {
            false
        }
    }
}
