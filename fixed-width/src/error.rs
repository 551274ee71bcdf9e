//! Error types for fixed-width encoding and decoding

use thiserror::Error;

/// Result type for fixed-width operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fixed-width errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Numeric value does not fit its field
    #[error("Field {field} too long: {actual} digits in a {width}-digit field")]
    FieldTooLong {
        /// Field name
        field: &'static str,
        /// Field width
        width: usize,
        /// Rendered length
        actual: usize,
    },

    /// Numeric field given a non-digit value
    #[error("Field {field} must be numeric, got {value:?}")]
    NonNumeric {
        /// Field name
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Line shorter than the span the accessed fields need
    #[error("Record too short: {actual} characters, {required} required")]
    RecordTooShort {
        /// Required length
        required: usize,
        /// Actual length
        actual: usize,
    },

    /// Amount cannot be stored as unsigned cents
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Layout does not add up to the record width
    #[error("Layout {layout} is {width} characters wide")]
    LayoutWidth {
        /// Layout name
        layout: &'static str,
        /// Computed width
        width: usize,
    },

    /// Value assigned to a field the layout does not have
    #[error("Layout {layout} has no field {field}")]
    UnknownField {
        /// Layout name
        layout: &'static str,
        /// Field name
        field: &'static str,
    },
}
