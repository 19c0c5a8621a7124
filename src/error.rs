use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidData(String),
    InvalidConfig(String),
    /// A shape invariant was violated (e.g. feature/label row counts disagree).
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// Normalization was requested before statistics were computed.
    NotFitted,
    /// Statistics were already computed; they are never recomputed.
    AlreadyFitted,
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            Error::NotFitted => write!(f, "standardizer has not been fitted"),
            Error::AlreadyFitted => write!(f, "standardizer statistics are already fitted"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_display_names_the_operand() {
        let err = Error::ShapeMismatch {
            what: "label rows",
            got: 3,
            expected: 4,
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch for label rows: got 3, expected 4"
        );
    }
}
