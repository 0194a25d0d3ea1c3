// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! Note letters and accidentals, keys on the circle of fifths, named
//! scales, triads and extended chords. Everything is spelled by letter,
//! never by semitone, so `G♭` and `F♯` stay distinct.

pub mod chord;
pub mod error;
pub mod key;
pub mod note;
pub mod render;
pub mod scale;
pub mod spelling;

pub use chord::{Chord, Extension, Triad, TriadQuality};
pub use error::{TheoryError, TheoryResult};
pub use key::Key;
pub use note::{Accidental, NoteLetter, PitchName};
pub use render::RenderOptions;
pub use scale::{Scale, ScaleName};
pub use spelling::IntervalSpec;
