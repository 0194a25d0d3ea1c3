// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note letters, accidentals and spelled pitch names.
//!
//! Spelling is kept literal: C♯ and D♭ are different values, and nothing here
//! ever folds one spelling into an enharmonic equivalent on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{TheoryError, TheoryResult};

/// The seven note letters, in their fixed cycle A→B→…→G→A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteLetter {
    /// All letters in cycle order
    pub const ALL: [NoteLetter; 7] = [
        NoteLetter::A,
        NoteLetter::B,
        NoteLetter::C,
        NoteLetter::D,
        NoteLetter::E,
        NoteLetter::F,
        NoteLetter::G,
    ];

    /// Position of this letter in the A-G cycle (0-6)
    pub fn index(self) -> usize {
        match self {
            NoteLetter::A => 0,
            NoteLetter::B => 1,
            NoteLetter::C => 2,
            NoteLetter::D => 3,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 6,
        }
    }

    /// Letter at a cycle position, wrapping past G
    pub fn from_index(index: usize) -> Self {
        NoteLetter::ALL[index % 7]
    }

    /// The next letter up (G wraps to A)
    pub fn next(self) -> Self {
        NoteLetter::from_index(self.index() + 1)
    }

    /// The next letter down (A wraps to G)
    pub fn previous(self) -> Self {
        NoteLetter::from_index(self.index() + 6)
    }

    /// All seven letters starting at this one
    pub fn cycle_from(self) -> [NoteLetter; 7] {
        let start = self.index();
        std::array::from_fn(|offset| NoteLetter::from_index(start + offset))
    }

    /// Parse a single letter, case-insensitive
    pub fn from_slug(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "a" => Some(NoteLetter::A),
            "b" => Some(NoteLetter::B),
            "c" => Some(NoteLetter::C),
            "d" => Some(NoteLetter::D),
            "e" => Some(NoteLetter::E),
            "f" => Some(NoteLetter::F),
            "g" => Some(NoteLetter::G),
            _ => None,
        }
    }

    /// Parse a letter or fail with `InvalidNoteLetter`
    pub fn parse(s: &str) -> TheoryResult<Self> {
        Self::from_slug(s).ok_or_else(|| TheoryError::InvalidNoteLetter(s.to_string()))
    }

    /// Uppercase display name
    pub fn name(self) -> &'static str {
        match self {
            NoteLetter::A => "A",
            NoteLetter::B => "B",
            NoteLetter::C => "C",
            NoteLetter::D => "D",
            NoteLetter::E => "E",
            NoteLetter::F => "F",
            NoteLetter::G => "G",
        }
    }
}

impl fmt::Display for NoteLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pitch modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accidental {
    Natural,
    Sharp,
    DoubleSharp,
    Flat,
    DoubleFlat,
}

impl Accidental {
    pub const ALL: [Accidental; 5] = [
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::DoubleSharp,
        Accidental::Flat,
        Accidental::DoubleFlat,
    ];

    /// Signed number of single steps away from natural
    pub fn offset(self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
            Accidental::Flat => -1,
            Accidental::DoubleFlat => -2,
        }
    }

    /// True for double-sharp and double-flat
    pub fn is_double(self) -> bool {
        matches!(self, Accidental::DoubleSharp | Accidental::DoubleFlat)
    }

    /// One step up, failing past double-sharp
    pub fn raise_strict(self) -> TheoryResult<Self> {
        match self {
            Accidental::DoubleFlat => Ok(Accidental::Flat),
            Accidental::Flat => Ok(Accidental::Natural),
            Accidental::Natural => Ok(Accidental::Sharp),
            Accidental::Sharp => Ok(Accidental::DoubleSharp),
            Accidental::DoubleSharp => Err(TheoryError::InvalidAccidentalStep {
                accidental: self.slug(),
                direction: "raise",
            }),
        }
    }

    /// One step down, failing past double-flat
    pub fn lower_strict(self) -> TheoryResult<Self> {
        match self {
            Accidental::DoubleSharp => Ok(Accidental::Sharp),
            Accidental::Sharp => Ok(Accidental::Natural),
            Accidental::Natural => Ok(Accidental::Flat),
            Accidental::Flat => Ok(Accidental::DoubleFlat),
            Accidental::DoubleFlat => Err(TheoryError::InvalidAccidentalStep {
                accidental: self.slug(),
                direction: "lower",
            }),
        }
    }

    /// Printed sign; `ascii` swaps the Unicode glyphs for keyboard-friendly ones
    pub fn glyph(self, ascii: bool) -> &'static str {
        match (self, ascii) {
            (Accidental::Natural, false) => "♮",
            (Accidental::Sharp, false) => "♯",
            (Accidental::DoubleSharp, false) => "𝄪",
            (Accidental::Flat, false) => "♭",
            (Accidental::DoubleFlat, false) => "𝄫",
            (Accidental::Natural, true) => "n",
            (Accidental::Sharp, true) => "#",
            (Accidental::DoubleSharp, true) => "x",
            (Accidental::Flat, true) => "b",
            (Accidental::DoubleFlat, true) => "bb",
        }
    }

    /// Kebab-case name, as used on the command line and in config files
    pub fn slug(self) -> &'static str {
        match self {
            Accidental::Natural => "natural",
            Accidental::Sharp => "sharp",
            Accidental::DoubleSharp => "double-sharp",
            Accidental::Flat => "flat",
            Accidental::DoubleFlat => "double-flat",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Accidental::ALL.into_iter().find(|a| a.slug() == s)
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph(false))
    }
}

/// A spelled note: a letter plus an accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchName {
    letter: NoteLetter,
    accidental: Accidental,
}

impl PitchName {
    pub fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub fn natural(letter: NoteLetter) -> Self {
        Self::new(letter, Accidental::Natural)
    }

    pub fn letter(&self) -> NoteLetter {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Same letter, different accidental
    pub fn with_accidental(self, accidental: Accidental) -> Self {
        Self { accidental, ..self }
    }

    /// Sharpen by one step. Past double-sharp the spelling rolls over to the
    /// next letter, natural.
    pub fn raise(self) -> Self {
        self.accidental
            .raise_strict()
            .map(|raised| self.with_accidental(raised))
            .unwrap_or_else(|_| PitchName::natural(self.letter.next()))
    }

    /// Flatten by one step. Past double-flat the spelling rolls over to the
    /// previous letter, natural.
    pub fn lower(self) -> Self {
        self.accidental
            .lower_strict()
            .map(|lowered| self.with_accidental(lowered))
            .unwrap_or_else(|_| PitchName::natural(self.letter.previous()))
    }

    /// Apply an accidental as a delta: one raise per sharp, one lower per flat
    pub fn alter(self, delta: Accidental) -> Self {
        let steps = delta.offset();
        let mut pitch = self;
        for _ in 0..steps.unsigned_abs() {
            pitch = if steps > 0 { pitch.raise() } else { pitch.lower() };
        }
        pitch
    }

    /// Letter followed by the accidental sign
    pub fn label(&self, show_natural: bool, ascii: bool) -> String {
        if self.accidental == Accidental::Natural && !show_natural {
            return self.letter.name().to_string();
        }
        format!("{}{}", self.letter, self.accidental.glyph(ascii))
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(false, false))
    }
}
