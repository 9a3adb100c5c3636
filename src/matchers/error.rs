// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the string matchers.

/// Error types for matcher construction, dispatch and scanning.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum MatchError {
    /// Empty pattern provided
    #[error("Pattern cannot be empty")]
    InvalidPattern,

    /// Pattern does not fit in the bit-parallel word
    #[error("Pattern length {len} exceeds the {max}-bit word width")]
    PatternTooLong {
        /// Length of the rejected pattern in characters
        len: usize,
        /// Largest supported pattern length
        max: usize,
    },

    /// Algorithm name not recognized by the dispatcher
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Text character outside the automaton alphabet under the rejecting policy
    #[error("Character {ch:?} at text index {index} is outside the automaton alphabet")]
    UnknownCharacter {
        /// The offending character
        ch: char,
        /// Character offset in the text
        index: usize,
    },

    /// `search` called before `preprocess`
    #[error("Matcher '{0}' has not been preprocessed")]
    NotPreprocessed(&'static str),

    /// Experiment or operation parameter out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for matcher operations
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(MatchError::InvalidPattern.to_string(), "Pattern cannot be empty");

        let err = MatchError::PatternTooLong { len: 65, max: 64 };
        assert_eq!(err.to_string(), "Pattern length 65 exceeds the 64-bit word width");

        let err = MatchError::UnknownCharacter { ch: 'x', index: 3 };
        assert_eq!(
            err.to_string(),
            "Character 'x' at text index 3 is outside the automaton alphabet"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = MatchError::UnknownAlgorithm("KMP".to_string());
        let err2 = MatchError::UnknownAlgorithm("KMP".to_string());
        let err3 = MatchError::NotPreprocessed("Bitap");

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
