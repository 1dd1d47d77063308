//! Sequence walker and indented report renderer
//!
//! [`render_all`] drives [`decode_one`] over a whole buffer and accumulates
//! a text report: one `TAG` line and one `LEN` line per object, a `VAL` hex
//! dump for non-empty primitive values, and two spaces of indentation per
//! open constructed level. The walk is flat; nesting is tracked with a
//! [`DepthStack`] of byte budgets rather than by recursing into constructed
//! values.
//!
//! A decode failure stops the walk. The report produced for the objects
//! decoded before the failure is kept and handed back together with the
//! error; nothing is resynchronized or retried.

use log::{trace, warn};

use crate::error::{TlvError, TlvResult};
use crate::tlv::decoder::decode_one;
use crate::tlv::types::{DepthStack, TlvObject};

/// Spaces of indentation per open constructed level.
const INDENT_WIDTH: usize = 2;

/// Outcome of one decode-and-render pass
///
/// Carries the accumulated report text and, when the walk was cut short,
/// the error that stopped it. The text always covers every object decoded
/// before the failure, so a truncated buffer still yields a usable partial
/// report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    text: String,
    error: Option<TlvError>,
}

impl Report {
    /// The rendered report text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of bytes written into the report.
    pub fn bytes_written(&self) -> usize {
        self.text.len()
    }

    /// The error that stopped the walk, if any.
    pub fn error(&self) -> Option<TlvError> {
        self.error
    }

    /// True when the whole buffer was walked without a decode error.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Consume the report, keeping only the text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Render the full indented report for a BER-TLV encoded buffer.
///
/// Pure function of the input bytes: repeated calls on the same buffer
/// produce byte-identical output. Garbage bytes (`0x00` / `0xFF`) before,
/// between and after top-level objects are skipped; a buffer consisting
/// only of filler renders as an empty, complete report.
pub fn render_all(buffer: &[u8]) -> Report {
    Walker::new(buffer).run()
}

/// Walk state for one decode-and-render pass.
///
/// Owns the byte cursor, the depth stack and the output accumulator; every
/// pass gets a fresh walker, so concurrent passes over independent buffers
/// never share state.
struct Walker<'a> {
    buffer: &'a [u8],
    position: usize,
    stack: DepthStack,
    /// Garbage skipping is only legal while the cursor is outside any open
    /// constructed object.
    outside_constructed: bool,
    out: String,
}

impl<'a> Walker<'a> {
    fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            stack: DepthStack::new(),
            outside_constructed: true,
            out: String::new(),
        }
    }

    fn run(mut self) -> Report {
        // Copy of the buffer reference, so decoded objects borrow the
        // buffer itself rather than the walker.
        let buffer = self.buffer;
        while self.position < buffer.len() {
            let window = &buffer[self.position..];
            let (object, skipped) = match decode_one(window, self.outside_constructed) {
                Ok(Some(decoded)) => decoded,
                Ok(None) => break,
                Err(err) => return self.stop(err),
            };
            self.position += skipped;

            self.emit_header(&object);
            if object.constructed {
                if let Err(err) = self.enter_constructed(&object) {
                    return self.stop(err);
                }
            } else {
                self.emit_primitive(&object);
            }
        }
        Report {
            text: self.out,
            error: None,
        }
    }

    fn stop(self, err: TlvError) -> Report {
        warn!(
            "stopping BER-TLV walk at offset {} of {}: {}",
            self.position,
            self.buffer.len(),
            err
        );
        Report {
            text: self.out,
            error: Some(err),
        }
    }

    /// Emit the TAG and LEN lines, indented at the current depth.
    fn emit_header(&mut self, object: &TlvObject<'_>) {
        self.indent();
        self.out.push_str(&format!(
            "TAG - 0x{:02X} ({}, {})\n",
            object.tag,
            object.class,
            object.type_name()
        ));
        self.indent();
        self.out
            .push_str(&format!("LEN - {} bytes\n", object.value_length));
    }

    /// Open a constructed object: the cursor advances past the header only,
    /// since the value bytes belong to the nested members walked next.
    fn enter_constructed(&mut self, object: &TlvObject<'_>) -> TlvResult<()> {
        self.position += object.header_size();
        if !self.stack.is_empty() {
            // This object is itself a member: charge its full size to the
            // enclosing budget first, closing out a sibling context when it
            // was the last remaining member of its parent.
            self.stack.charge(object.total_size());
        }
        self.stack.push(object.value_length)?;
        trace!(
            "opened constructed object 0x{:02X}, depth now {}",
            object.tag,
            self.stack.depth()
        );
        self.outside_constructed = false;
        self.out.push('\n');
        Ok(())
    }

    /// Consume a primitive object: emit the value dump and charge the full
    /// encoded size to the enclosing budget.
    fn emit_primitive(&mut self, object: &TlvObject<'_>) {
        self.position += object.total_size();
        if object.value_length > 0 {
            self.indent();
            self.out.push_str("VAL - ");
            for byte in object.value {
                self.out.push_str(&format!("0x{:02X} ", byte));
            }
            self.out.push('\n');
        }
        self.out.push('\n');

        if self.stack.is_empty() {
            self.outside_constructed = true;
        } else if self.stack.charge(object.total_size()) {
            trace!("closed constructed object, depth now {}", self.stack.depth());
            if self.stack.is_empty() {
                // Back at the top level, filler bytes are permitted again.
                self.outside_constructed = true;
            }
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.stack.depth() * INDENT_WIDTH {
            self.out.push(' ');
        }
    }
}
