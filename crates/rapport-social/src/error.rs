//! Error types for the rapport-social crate.
//!
//! All ledger and bridging operations that can fail return typed errors
//! rather than panicking. Emotional-model functions work in `f64` and cannot
//! fail; everything touching [`rust_decimal::Decimal`] uses checked
//! arithmetic and surfaces faults through [`SocialError`].

/// Errors that can occur in the social model.
#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    /// An arithmetic overflow occurred during a score computation.
    #[error("arithmetic overflow in score computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A floating-point score could not be represented as a decimal.
    #[error("score {value} is not representable as a decimal")]
    UnrepresentableScore {
        /// The offending floating-point value.
        value: f64,
    },
}
