//! Single-object BER-TLV decoder
//!
//! [`decode_one`] decodes exactly one TLV header from a byte window and
//! validates the declared value against the remaining size. It is a pure
//! step function: the walker in [`render`](crate::tlv::render) drives it in
//! a loop, but it is equally usable on its own for callers that want one
//! object at a time.

use crate::error::{TlvError, TlvResult};
use crate::tlv::types::{TagClass, TlvObject};

/// Filler bytes permitted before and between top-level objects.
const FILLER_BYTES: [u8; 2] = [0x00, 0xFF];
/// All five low bits set in the first tag byte announce a second tag byte.
const TWO_BYTE_TAG_MASK: u8 = 0x1F;
/// Bit 5 of the first tag byte: primitive (0) or constructed (1).
const CONSTRUCTED_MASK: u8 = 0x20;
/// Bit 7 of the first length byte selects the long-form length encoding.
const LONG_FORM_MASK: u8 = 0x80;
/// Minimum header: one tag byte plus one length byte.
const MIN_HEADER_SIZE: usize = 2;

/// Decode one TLV object from the front of `buffer`.
///
/// `buffer` is the remaining window of the source data: the caller's cursor
/// and remaining-size budget collapse into one slice. Offsets in the
/// returned [`TlvObject`] are relative to this slice.
///
/// # Arguments
/// * `buffer` - Remaining bytes to decode from
/// * `skip_garbage` - Skip leading filler bytes (`0x00` / `0xFF`). Enable
///   only when the cursor is not inside an open constructed object; between
///   members of a constructed object filler is not permitted.
///
/// # Returns
/// `Ok(Some((object, skipped)))` with the decoded descriptor and the number
/// of garbage bytes consumed in front of it. `Ok(None)` when garbage
/// skipping consumed the whole window, which is a clean end-of-data signal
/// and not an error.
///
/// # Error Handling
/// Returns [`TlvError::InsufficientData`] when the window is smaller than
/// the minimum header or than the full tag + length + value span. Errors
/// are terminal for the walk that issued the decode; there is no
/// resynchronization past a bad header.
pub fn decode_one(buffer: &[u8], skip_garbage: bool) -> TlvResult<Option<(TlvObject<'_>, usize)>> {
    let skipped = if skip_garbage {
        count_garbage(buffer)
    } else {
        0
    };
    let data = &buffer[skipped..];

    if data.is_empty() {
        if skip_garbage {
            // Buffer empty or fully consumed by filler bytes.
            return Ok(None);
        }
        return Err(TlvError::InsufficientData {
            actual: 0,
            required: MIN_HEADER_SIZE,
            tag_size: 0,
            length_size: 0,
            value_length: 0,
        });
    }

    let first = data[0];
    let tag_size = if first & TWO_BYTE_TAG_MASK == TWO_BYTE_TAG_MASK {
        2
    } else {
        1
    };

    // One length byte must follow the tag.
    let min_header = tag_size + 1;
    if data.len() < min_header {
        return Err(TlvError::InsufficientData {
            actual: data.len(),
            required: min_header,
            tag_size,
            length_size: 0,
            value_length: 0,
        });
    }

    let tag = if tag_size == 2 {
        u16::from_be_bytes([first, data[1]])
    } else {
        u16::from(first)
    };
    let class = TagClass::from_tag_byte(first);
    let constructed = first & CONSTRUCTED_MASK != 0;

    let length_first = data[tag_size];
    let (length_size, value_length) = if length_first & LONG_FORM_MASK == 0 {
        // Short form: the byte is the value length itself.
        (1, usize::from(length_first))
    } else {
        // Long form: low 7 bits give the count of big-endian length bytes.
        let length_size = 1 + usize::from(length_first & !LONG_FORM_MASK);
        let header_size = tag_size + length_size;
        if data.len() < header_size {
            return Err(TlvError::InsufficientData {
                actual: data.len(),
                required: header_size,
                tag_size,
                length_size,
                value_length: 0,
            });
        }
        let mut assembled: usize = 0;
        for &byte in &data[tag_size + 1..header_size] {
            // Saturate instead of wrapping; an absurd length fails the
            // bounds check below.
            assembled = assembled.saturating_mul(256) | usize::from(byte);
        }
        (length_size, assembled)
    };

    let header_size = tag_size + length_size;
    if value_length > data.len() - header_size {
        return Err(TlvError::InsufficientData {
            actual: data.len(),
            required: header_size.saturating_add(value_length),
            tag_size,
            length_size,
            value_length,
        });
    }

    let object = TlvObject {
        tag,
        tag_size,
        length_size,
        value_length,
        value_offset: skipped + header_size,
        value: &data[header_size..header_size + value_length],
        class,
        constructed,
    };
    Ok(Some((object, skipped)))
}

fn count_garbage(buffer: &[u8]) -> usize {
    buffer
        .iter()
        .take_while(|byte| FILLER_BYTES.contains(*byte))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_primitive_short_form() {
        let data = [0x5A, 0x03, 0x01, 0x02, 0x03];
        let (obj, skipped) = decode_one(&data, true).unwrap().unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(obj.tag, 0x5A);
        assert_eq!(obj.tag_size, 1);
        assert_eq!(obj.class, TagClass::Application);
        assert!(!obj.constructed);
        assert_eq!(obj.length_size, 1);
        assert_eq!(obj.value_length, 3);
        // Value starts immediately after the length byte.
        assert_eq!(obj.value_offset, 2);
        assert_eq!(obj.value, &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_decode_zero_length_value() {
        let data = [0x5A, 0x00];
        let (obj, _) = decode_one(&data, true).unwrap().unwrap();
        assert_eq!(obj.value_length, 0);
        assert_eq!(obj.value, &[] as &[u8]);
        assert_eq!(obj.total_size(), 2);
    }

    #[test]
    fn test_decode_two_byte_tag() {
        // Low five bits of 0x9F are all set, so a second tag byte follows
        // regardless of its value.
        let data = [0x9F, 0x02, 0x01, 0xAA];
        let (obj, _) = decode_one(&data, true).unwrap().unwrap();
        assert_eq!(obj.tag, 0x9F02);
        assert_eq!(obj.tag_size, 2);
        assert_eq!(obj.class, TagClass::ContextSpecific);
        assert!(!obj.constructed);
        assert_eq!(obj.value, &[0xAA]);
    }

    #[test]
    fn test_decode_constructed_flag() {
        let data = [0x6F, 0x00];
        let (obj, _) = decode_one(&data, true).unwrap().unwrap();
        assert_eq!(obj.tag, 0x6F);
        assert!(obj.constructed);
        assert_eq!(obj.class, TagClass::Application);
    }

    #[test]
    fn test_decode_long_form_one_byte() {
        let mut data = vec![0x5A, 0x81, 0x05];
        data.extend_from_slice(&[0u8; 5]);
        let (obj, _) = decode_one(&data, true).unwrap().unwrap();
        assert_eq!(obj.length_size, 2);
        assert_eq!(obj.value_length, 5);
        assert_eq!(obj.value_offset, 3);
    }

    #[test]
    fn test_decode_long_form_two_bytes() {
        let mut data = vec![0x5A, 0x82, 0x01, 0x2C];
        data.extend_from_slice(&vec![0u8; 300]);
        let (obj, _) = decode_one(&data, true).unwrap().unwrap();
        assert_eq!(obj.length_size, 3);
        assert_eq!(obj.value_length, 300);
        assert_eq!(obj.value.len(), 300);
    }

    #[test]
    fn test_garbage_skip() {
        let data = [0xFF, 0xFF, 0x00, 0x5A, 0x01, 0x42];
        let (obj, skipped) = decode_one(&data, true).unwrap().unwrap();
        assert_eq!(skipped, 3);
        assert_eq!(obj.tag, 0x5A);
        assert_eq!(obj.value, &[0x42]);
        assert_eq!(obj.value_offset, 5);
    }

    #[test]
    fn test_garbage_not_skipped_inside_constructed() {
        // With skipping disabled, 0x00 decodes as a tag byte.
        let data = [0x00, 0x01, 0xAA];
        let (obj, skipped) = decode_one(&data, false).unwrap().unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(obj.tag, 0x00);
        assert_eq!(obj.value, &[0xAA]);
    }

    #[test]
    fn test_filler_only_buffer_is_clean_end() {
        let data = [0x00, 0xFF, 0x00];
        assert_eq!(decode_one(&data, true).unwrap(), None);
        assert_eq!(decode_one(&[], true).unwrap(), None);
    }

    #[test]
    fn test_insufficient_data_for_header() {
        let data = [0x5A];
        let err = decode_one(&data, true).unwrap_err();
        assert_eq!(
            err,
            TlvError::InsufficientData {
                actual: 1,
                required: 2,
                tag_size: 1,
                length_size: 0,
                value_length: 0,
            }
        );
    }

    #[test]
    fn test_insufficient_data_for_two_byte_tag_header() {
        // Two-byte tag needs three header bytes.
        let data = [0x9F, 0x02];
        let err = decode_one(&data, true).unwrap_err();
        assert_eq!(
            err,
            TlvError::InsufficientData {
                actual: 2,
                required: 3,
                tag_size: 2,
                length_size: 0,
                value_length: 0,
            }
        );
    }

    #[test]
    fn test_insufficient_data_for_long_form_length_field() {
        let data = [0x5A, 0x82, 0x01];
        let err = decode_one(&data, true).unwrap_err();
        assert_eq!(
            err,
            TlvError::InsufficientData {
                actual: 3,
                required: 4,
                tag_size: 1,
                length_size: 3,
                value_length: 0,
            }
        );
    }

    #[test]
    fn test_insufficient_data_for_value() {
        let data = [0x5A, 0x05, 0x01, 0x02];
        let err = decode_one(&data, true).unwrap_err();
        assert_eq!(
            err,
            TlvError::InsufficientData {
                actual: 4,
                required: 7,
                tag_size: 1,
                length_size: 1,
                value_length: 5,
            }
        );
    }

    #[test]
    fn test_empty_buffer_without_skip_is_error() {
        let err = decode_one(&[], false).unwrap_err();
        assert!(matches!(
            err,
            TlvError::InsufficientData {
                actual: 0,
                required: 2,
                ..
            }
        ));
    }
}
