use thiserror::Error;

/// Failure to parse an [`InputStroke`](crate::input::InputStroke) from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrokeParseError {
    #[error("input stroke is empty")]
    Empty,

    #[error("unknown input `{0}`")]
    UnknownInput(String),
}
