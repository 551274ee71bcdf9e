//! Field descriptors and the padding policies applied to them
//!
//! Numeric fields are right-aligned and zero-filled; a value wider than its
//! field is an error. Text fields are left-aligned and space-filled; a value
//! wider than its field is cut to fit (see [`truncate_or_pad`]).

use crate::{Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Alignment of a value within its field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Value first, padding after
    Left,
    /// Padding first, value after
    Right,
}

/// How a field is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Digits only, zero-padded on the left
    Numeric,
    /// Free text, space-padded on the right, truncated on overflow
    Text,
    /// Reserved space, always blank
    Filler,
}

/// Position and encoding of one field inside a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,
    /// Zero-based character offset
    pub offset: usize,
    /// Width in characters
    pub width: usize,
    /// Encoding
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Numeric field
    pub const fn numeric(name: &'static str, offset: usize, width: usize) -> Self {
        Self { name, offset, width, kind: FieldKind::Numeric }
    }

    /// Text field
    pub const fn text(name: &'static str, offset: usize, width: usize) -> Self {
        Self { name, offset, width, kind: FieldKind::Text }
    }

    /// Filler
    pub const fn filler(offset: usize, width: usize) -> Self {
        Self { name: "filler", offset, width, kind: FieldKind::Filler }
    }

    /// Offset one past the last character
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// Pad `value` to `width` with `pad`. Never truncates.
pub fn pad(value: &str, width: usize, align: Align, pad: char) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let fill: String = std::iter::repeat(pad).take(width - len).collect();
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}

/// Text policy: control characters become spaces, then the value is cut
/// to `width` characters and space-padded on the right.
pub fn truncate_or_pad(value: &str, width: usize) -> String {
    let cut: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(width)
        .collect();
    pad(&cut, width, Align::Left, ' ')
}

/// Numeric policy: zero-pad on the left, fail if the digits do not fit.
pub fn zero_pad(field: &'static str, value: &str, width: usize) -> Result<String> {
    let value = value.trim();
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::NonNumeric {
            field,
            value: value.to_string(),
        });
    }
    if value.len() > width {
        return Err(Error::FieldTooLong {
            field,
            width,
            actual: value.len(),
        });
    }
    Ok(pad(value, width, Align::Right, '0'))
}

/// Render `value` according to the field's kind
pub fn encode_field(spec: &FieldSpec, value: &str) -> Result<String> {
    match spec.kind {
        FieldKind::Numeric => zero_pad(spec.name, value, spec.width),
        FieldKind::Text => Ok(truncate_or_pad(value, spec.width)),
        FieldKind::Filler => Ok(" ".repeat(spec.width)),
    }
}

/// Currency amount to whole cents, rounding half away from zero
pub fn amount_to_cents(amount: Decimal) -> Result<u64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::InvalidAmount(format!("negative amount {amount}")));
    }
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        * Decimal::ONE_HUNDRED;
    cents
        .to_u64()
        .ok_or_else(|| Error::InvalidAmount(format!("amount {amount} out of range")))
}

/// Whole cents back to a two-decimal currency amount
pub fn cents_to_amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Slice `width` characters starting at character `offset`
pub(crate) fn char_slice(line: &str, offset: usize, width: usize) -> Option<&str> {
    if line.is_ascii() {
        return line.get(offset..offset + width);
    }
    let mut indices = line.char_indices().map(|(i, _)| i).chain(std::iter::once(line.len()));
    let start = indices.nth(offset)?;
    let end = if width == 0 {
        start
    } else {
        indices.nth(width - 1)?
    };
    line.get(start..end)
}
