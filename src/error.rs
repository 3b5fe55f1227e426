//! Error type for ramp edits and recalculation passes.

/// Everything that can stop an edit or a recalculation pass.
///
/// None of these are fatal: callers log them and keep the previous state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RampError {
    #[error("not a number: {text:?}")]
    InvalidNumber { text: String },

    #[error("range for channel {channel} must be finite and non-zero")]
    ZeroRange { channel: usize },

    #[error("conversion produced a non-finite value in row {row}")]
    NonFinite { row: usize },

    #[error("row {row} does not exist")]
    RowOutOfRange { row: usize },

    #[error("channel {channel} does not exist")]
    ChannelOutOfRange { channel: usize },

    #[error("row {row} has no interpolation binding")]
    NotAMiddleRow { row: usize },

    #[error("lightness of row {row} is derived from its interpolation fraction")]
    LightnessIsDerived { row: usize },

    #[error("fraction of row {row} is derived from its lightness")]
    FractionIsDerived { row: usize },

    #[error("endpoint lightness values are equal")]
    DegenerateEndpoints,
}
