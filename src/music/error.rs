// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory engine.
//!
//! Every variant is an invalid-input condition raised at construction time.
//! "Not found" outcomes (an unrecognized chord name, a signature count above
//! 14) are ordinary `None` values and never show up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// A strict accidental step ran off the end of the accidental range.
    #[error("Cannot {direction} a {accidental} any further")]
    InvalidAccidentalStep {
        accidental: &'static str,
        direction: &'static str,
    },

    /// The root would need more than 14 sharps or flats.
    #[error("Invalid key {root}: {count} {kind} exceeds the limit of 14")]
    InvalidKey {
        root: String,
        count: u8,
        kind: &'static str,
    },

    /// A note letter outside A-G.
    #[error("Invalid note letter: {0:?}")]
    InvalidNoteLetter(String),

    /// A slug that names no accidental, scale or triad.
    #[error("Unknown {kind} name: {name:?}")]
    UnknownName { kind: &'static str, name: String },

    /// A triad spelling that is not exactly root, fifth and one other degree.
    #[error("Malformed triad: {0}")]
    MalformedTriad(String),

    /// A chord name whose structure cannot be read.
    #[error("Malformed chord: {0}")]
    MalformedChord(String),
}

/// Result type for theory operations
pub type TheoryResult<T> = Result<T, TheoryError>;
