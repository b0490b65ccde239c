use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("index {index}/{len} out of bound")]
    IndexOutOfRange { index: isize, len: usize },
}

/// Why a freshly drawn stroke was not turned into a ball
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathRejection {
    #[error("path has {count} point(s), at least 2 are needed")]
    TooFewPoints { count: usize },

    #[error("path length {length:.3} is below the minimum {min:.3}")]
    TooShort { length: f64, min: f64 },

    #[error("path ratio {ratio:.3} is below the minimum {min:.3}")]
    TooThin { ratio: f64, min: f64 },
}
