//! # Record Codec
//!
//! Length-prefixed field framing for stored record values.
//!
//! Each field is written as a `u16` big-endian length followed by the field
//! bytes. Field content is never inspected, so a field may contain any byte
//! (including the `|` used by event lines) without making decoding ambiguous.
//!
//! ```text
//! ┌────────┬──────────────┬────────┬──────────────┬─────
//! │ len(2) │ field 0 ...  │ len(2) │ field 1 ...  │ ...
//! └────────┴──────────────┴────────┴──────────────┴─────
//! ```

use crate::errors::CodecError;

/// Width of the per-field length prefix.
pub const LENGTH_PREFIX_LEN: usize = 2;

/// Largest field the prefix can describe.
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

/// Encodes an ordered sequence of fields into one value.
///
/// # Errors
///
/// Returns [`CodecError::FieldTooLarge`] if a field does not fit the prefix.
pub fn encode_fields<F: AsRef<[u8]>>(fields: &[F]) -> Result<Vec<u8>, CodecError> {
    let total: usize = fields
        .iter()
        .map(|f| LENGTH_PREFIX_LEN + f.as_ref().len())
        .sum();
    let mut out = Vec::with_capacity(total);

    for (index, field) in fields.iter().enumerate() {
        let field = field.as_ref();
        let len = u16::try_from(field.len()).map_err(|_| CodecError::FieldTooLarge {
            index,
            len: field.len(),
            max: MAX_FIELD_LEN,
        })?;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(field);
    }

    Ok(out)
}

/// Decodes a value into exactly `expected` fields.
///
/// # Errors
///
/// - [`CodecError::Truncated`] if a prefix or field runs past the end.
/// - [`CodecError::FieldCountMismatch`] if the value holds a different number
///   of fields than the family schema.
pub fn decode_fields(value: &[u8], expected: usize) -> Result<Vec<Vec<u8>>, CodecError> {
    let mut fields = Vec::with_capacity(expected);
    let mut offset = 0usize;

    while offset < value.len() {
        let prefix = value
            .get(offset..offset + LENGTH_PREFIX_LEN)
            .ok_or(CodecError::Truncated { offset })?;
        let len = usize::from(u16::from_be_bytes([prefix[0], prefix[1]]));
        offset += LENGTH_PREFIX_LEN;

        let field = value
            .get(offset..offset + len)
            .ok_or(CodecError::Truncated { offset })?;
        fields.push(field.to_vec());
        offset += len;
    }

    if fields.len() != expected {
        return Err(CodecError::FieldCountMismatch {
            expected,
            actual: fields.len(),
        });
    }

    Ok(fields)
}

// =============================================================================
// TESTS
// =============================================================================
