use lottie_data::{ReaderError, TokenKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LottieError>;

#[derive(Debug, Error)]
pub enum LottieError {
    /// The token shape does not match any encoding of the target value type.
    #[error("can't parse {found} into {expected}")]
    MalformedValue {
        expected: &'static str,
        found: TokenKind,
    },

    /// The keyframes span no time: the last keyed frame is not after the first.
    #[error("invalid keyframe duration {start_frame}->{end_frame}")]
    InvalidDuration { start_frame: i64, end_frame: i64 },

    #[error("missing required key \"{key}\"")]
    MissingRequiredKey { key: &'static str },

    #[error(transparent)]
    Reader(ReaderError),
}

impl From<ReaderError> for LottieError {
    fn from(err: ReaderError) -> Self {
        match err {
            ReaderError::UnexpectedToken { expected, found } => LottieError::MalformedValue {
                expected: expected.as_str(),
                found,
            },
            ReaderError::NotAnInteger(_) => LottieError::MalformedValue {
                expected: "integer",
                found: TokenKind::Number,
            },
            other => LottieError::Reader(other),
        }
    }
}

impl LottieError {
    pub(crate) fn malformed(expected: &'static str, found: TokenKind) -> Self {
        LottieError::MalformedValue { expected, found }
    }
}
