// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tonal: a small music-theory engine.
//!
//! Builds key signatures on the circle of fifths, spells diatonic scales,
//! triads and extended chords, and parses hyphenated chord names such as
//! `c-minor7-flat5th` back into chords.

pub mod config;
pub mod logging;
pub mod music;
pub mod parser;
pub mod query;

pub use music::{
    Accidental, Chord, Extension, IntervalSpec, Key, NoteLetter, PitchName, RenderOptions,
    Scale, ScaleName, TheoryError, TheoryResult, Triad, TriadQuality,
};
pub use parser::parse_chord_name;
pub use query::{answer, Answer, KeySignature, Query};
