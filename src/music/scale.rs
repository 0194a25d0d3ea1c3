// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale spellings and the named scale registry.
//!
//! A scale is a list of interval specs laid over a key: "1, 2, 3♭, 4, 5, 6♭,
//! 7♭" over A major gives A natural minor. Spellings are compared literally,
//! so building a scale from a registry spelling recovers its name.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::key::Key;
use super::note::{Accidental, PitchName};
use super::render::RenderOptions;
use super::spelling::{join_labels, resolve_all, IntervalSpec};

const N: Accidental = Accidental::Natural;
const S: Accidental = Accidental::Sharp;
const F: Accidental = Accidental::Flat;
const FF: Accidental = Accidental::DoubleFlat;

const fn spec(degree: u8, accidental: Accidental) -> IntervalSpec {
    IntervalSpec::new(degree, accidental)
}

const MAJOR: [IntervalSpec; 7] = [
    spec(1, N), spec(2, N), spec(3, N), spec(4, N), spec(5, N), spec(6, N), spec(7, N),
];
const MAJOR_PENTATONIC: [IntervalSpec; 5] = [
    spec(1, N), spec(2, N), spec(3, N), spec(5, N), spec(6, N),
];
const NATURAL_MINOR: [IntervalSpec; 7] = [
    spec(1, N), spec(2, N), spec(3, F), spec(4, N), spec(5, N), spec(6, F), spec(7, F),
];
const NATURAL_MINOR_PENTATONIC: [IntervalSpec; 5] = [
    spec(1, N), spec(3, F), spec(4, N), spec(5, N), spec(7, F),
];
const HARMONIC_MINOR: [IntervalSpec; 7] = [
    spec(1, N), spec(2, N), spec(3, F), spec(4, N), spec(5, N), spec(6, F), spec(7, N),
];
const BLUES: [IntervalSpec; 6] = [
    spec(1, N), spec(3, F), spec(4, N), spec(5, F), spec(5, N), spec(7, F),
];
const CHROMATIC: [IntervalSpec; 12] = [
    spec(1, N), spec(2, F), spec(2, N), spec(3, F), spec(3, N), spec(4, N), spec(4, S), spec(5, N),
    spec(6, F), spec(6, N), spec(7, F), spec(7, N),
];
const DORIAN: [IntervalSpec; 7] = [
    spec(1, N), spec(2, N), spec(3, F), spec(4, N), spec(5, N), spec(6, N), spec(7, F),
];
const PHRYGIAN: [IntervalSpec; 7] = [
    spec(1, N), spec(2, F), spec(3, F), spec(4, N), spec(5, N), spec(6, F), spec(7, F),
];
const LYDIAN: [IntervalSpec; 7] = [
    spec(1, N), spec(2, N), spec(3, N), spec(4, S), spec(5, N), spec(6, N), spec(7, N),
];
const MIXOLYDIAN: [IntervalSpec; 7] = [
    spec(1, N), spec(2, N), spec(3, N), spec(4, N), spec(5, N), spec(6, N), spec(7, F),
];
const LOCRIAN: [IntervalSpec; 7] = [
    spec(1, N), spec(2, F), spec(3, F), spec(4, N), spec(5, F), spec(6, F), spec(7, F),
];
const LYDIAN_FLAT_7: [IntervalSpec; 7] = [
    spec(1, N), spec(2, N), spec(3, N), spec(4, S), spec(5, N), spec(6, N), spec(7, F),
];
const WHOLE_TONE: [IntervalSpec; 6] = [
    spec(1, N), spec(2, N), spec(3, N), spec(4, S), spec(5, S), spec(7, F),
];
const JAZZ_MELODIC_MINOR: [IntervalSpec; 7] = [
    spec(1, N), spec(2, N), spec(3, F), spec(4, N), spec(5, N), spec(6, N), spec(7, N),
];
const WHOLE_HALF_DIMINISHED: [IntervalSpec; 8] = [
    spec(1, N),
    spec(2, N),
    spec(3, F),
    spec(4, N),
    spec(5, F),
    spec(6, F),
    spec(7, FF),
    spec(7, N),
];
const HALF_WHOLE_DIMINISHED: [IntervalSpec; 8] = [
    spec(1, N), spec(2, F), spec(2, S), spec(3, N), spec(4, S), spec(5, N), spec(6, N), spec(7, F),
];

/// Named scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleName {
    Major,
    MajorPentatonic,
    NaturalMinor,
    NaturalMinorPentatonic,
    HarmonicMinor,
    Blues,
    Chromatic,
    DorianMode,
    PhrygianMode,
    LydianMode,
    MixolydianMode,
    LocrianMode,
    LydianModeFlat7,
    WholeTone,
    JazzMelodicMinor,
    WholeHalfDiminished,
    HalfWholeDiminished,
}

impl ScaleName {
    /// Registry order; reverse lookup takes the first match
    pub const ALL: [ScaleName; 17] = [
        ScaleName::Major,
        ScaleName::MajorPentatonic,
        ScaleName::NaturalMinor,
        ScaleName::NaturalMinorPentatonic,
        ScaleName::HarmonicMinor,
        ScaleName::Blues,
        ScaleName::Chromatic,
        ScaleName::DorianMode,
        ScaleName::PhrygianMode,
        ScaleName::LydianMode,
        ScaleName::MixolydianMode,
        ScaleName::LocrianMode,
        ScaleName::LydianModeFlat7,
        ScaleName::WholeTone,
        ScaleName::JazzMelodicMinor,
        ScaleName::WholeHalfDiminished,
        ScaleName::HalfWholeDiminished,
    ];

    /// The fixed spelling for this scale
    pub fn spelling(self) -> &'static [IntervalSpec] {
        match self {
            ScaleName::Major => &MAJOR,
            ScaleName::MajorPentatonic => &MAJOR_PENTATONIC,
            ScaleName::NaturalMinor => &NATURAL_MINOR,
            ScaleName::NaturalMinorPentatonic => &NATURAL_MINOR_PENTATONIC,
            ScaleName::HarmonicMinor => &HARMONIC_MINOR,
            ScaleName::Blues => &BLUES,
            ScaleName::Chromatic => &CHROMATIC,
            ScaleName::DorianMode => &DORIAN,
            ScaleName::PhrygianMode => &PHRYGIAN,
            ScaleName::LydianMode => &LYDIAN,
            ScaleName::MixolydianMode => &MIXOLYDIAN,
            ScaleName::LocrianMode => &LOCRIAN,
            ScaleName::LydianModeFlat7 => &LYDIAN_FLAT_7,
            ScaleName::WholeTone => &WHOLE_TONE,
            ScaleName::JazzMelodicMinor => &JAZZ_MELODIC_MINOR,
            ScaleName::WholeHalfDiminished => &WHOLE_HALF_DIMINISHED,
            ScaleName::HalfWholeDiminished => &HALF_WHOLE_DIMINISHED,
        }
    }

    /// Find the registry entry with exactly this spelling
    pub fn find(spelling: &[IntervalSpec]) -> Option<Self> {
        ScaleName::ALL
            .into_iter()
            .find(|name| name.spelling() == spelling)
    }

    /// Get a human-readable name for this scale
    pub fn name(self) -> &'static str {
        match self {
            ScaleName::Major => "Major",
            ScaleName::MajorPentatonic => "Major Pentatonic",
            ScaleName::NaturalMinor => "Natural Minor",
            ScaleName::NaturalMinorPentatonic => "Natural Minor Pentatonic",
            ScaleName::HarmonicMinor => "Harmonic Minor",
            ScaleName::Blues => "Blues",
            ScaleName::Chromatic => "Chromatic",
            ScaleName::DorianMode => "Dorian Mode",
            ScaleName::PhrygianMode => "Phrygian Mode",
            ScaleName::LydianMode => "Lydian Mode",
            ScaleName::MixolydianMode => "Mixolydian Mode",
            ScaleName::LocrianMode => "Locrian Mode",
            ScaleName::LydianModeFlat7 => "Lydian Flat7 Mode",
            ScaleName::WholeTone => "Whole Tone",
            ScaleName::JazzMelodicMinor => "Jazz Melodic Minor",
            ScaleName::WholeHalfDiminished => "Whole Half Diminished",
            ScaleName::HalfWholeDiminished => "Half Whole Diminished",
        }
    }

    /// Kebab-case identifier, e.g. `natural-minor`
    pub fn slug(self) -> &'static str {
        match self {
            ScaleName::Major => "major",
            ScaleName::MajorPentatonic => "major-pentatonic",
            ScaleName::NaturalMinor => "natural-minor",
            ScaleName::NaturalMinorPentatonic => "natural-minor-pentatonic",
            ScaleName::HarmonicMinor => "harmonic-minor",
            ScaleName::Blues => "blues",
            ScaleName::Chromatic => "chromatic",
            ScaleName::DorianMode => "dorian-mode",
            ScaleName::PhrygianMode => "phrygian-mode",
            ScaleName::LydianMode => "lydian-mode",
            ScaleName::MixolydianMode => "mixolydian-mode",
            ScaleName::LocrianMode => "locrian-mode",
            ScaleName::LydianModeFlat7 => "lydian-mode-flat7",
            ScaleName::WholeTone => "whole-tone",
            ScaleName::JazzMelodicMinor => "jazz-melodic-minor",
            ScaleName::WholeHalfDiminished => "whole-half-diminished",
            ScaleName::HalfWholeDiminished => "half-whole-diminished",
        }
    }

    /// Parse scale name from its slug
    pub fn from_slug(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '_'], "-");
        ScaleName::ALL.into_iter().find(|name| name.slug() == s)
    }
}

impl fmt::Display for ScaleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A spelling laid over a key
#[derive(Debug, Clone)]
pub struct Scale {
    key: Key,
    spelling: Vec<IntervalSpec>,
    name: Option<ScaleName>,
    notes: OnceLock<Vec<PitchName>>,
}

impl Scale {
    /// Create a named scale on a key
    pub fn new(key: Key, name: ScaleName) -> Self {
        Self {
            key,
            spelling: name.spelling().to_vec(),
            name: Some(name),
            notes: OnceLock::new(),
        }
    }

    /// Create a scale from an explicit spelling, naming it if the spelling
    /// matches a registry entry exactly
    pub fn from_spelling(key: Key, spelling: Vec<IntervalSpec>) -> Self {
        let name = ScaleName::find(&spelling);
        Self {
            key,
            spelling,
            name,
            notes: OnceLock::new(),
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn spelling(&self) -> &[IntervalSpec] {
        &self.spelling
    }

    /// Registry name, if the spelling has one
    pub fn name(&self) -> Option<ScaleName> {
        self.name
    }

    /// The spelled notes, one per interval spec
    pub fn notes(&self) -> &[PitchName] {
        self.notes.get_or_init(|| {
            trace!(scale = %self, "spelling scale notes");
            resolve_all(&self.spelling, self.key.diatonic_notes())
        })
    }

    /// Get the number of notes in this scale
    pub fn len(&self) -> usize {
        self.spelling.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spelling.is_empty()
    }

    /// Header line, spelling with its octave, a blank line, then the numbered
    /// notes and the octave
    pub fn describe(&self, opts: &RenderOptions) -> String {
        let mut out = format!("{}\n", self.header(opts));
        out.push_str(&join_labels(&self.spelling, true, opts));
        out.push_str("\n\n");

        let notes = self.notes();
        for (i, note) in notes.iter().chain(notes.first()).enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, opts.pitch(*note)));
        }
        out
    }

    fn header(&self, opts: &RenderOptions) -> String {
        let root = opts.pitch(self.key.root());
        match self.name {
            Some(name) => format!("{} {}", root, name),
            None => root,
        }
    }
}

impl PartialEq for Scale {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.spelling == other.spelling
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header(&RenderOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::note::NoteLetter;

    fn key(letter: NoteLetter, accidental: Accidental) -> Key {
        Key::new(letter, accidental).unwrap()
    }

    fn labels(scale: &Scale) -> Vec<String> {
        scale.notes().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_c_major_scale() {
        let scale = Scale::new(key(NoteLetter::C, N), ScaleName::Major);
        assert_eq!(labels(&scale), vec!["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn test_a_natural_minor() {
        let scale = Scale::new(key(NoteLetter::A, N), ScaleName::NaturalMinor);
        assert_eq!(labels(&scale), vec!["A", "B", "C", "D", "E", "F", "G"]);
    }

    #[test]
    fn test_scale_length_matches_spelling() {
        let root = key(NoteLetter::E, F);
        for name in ScaleName::ALL {
            let scale = Scale::new(root.clone(), name);
            assert_eq!(scale.notes().len(), name.spelling().len(), "{}", name);
            assert_eq!(scale.len(), scale.notes().len());
        }
    }

    #[test]
    fn test_reverse_lookup_recovers_name() {
        let root = key(NoteLetter::G, N);
        for name in ScaleName::ALL {
            let scale = Scale::from_spelling(root.clone(), name.spelling().to_vec());
            assert_eq!(scale.name(), Some(name));
        }
    }

    #[test]
    fn test_reverse_lookup_requires_exact_order() {
        let mut spelling = MAJOR.to_vec();
        spelling.swap(1, 2);
        let scale = Scale::from_spelling(key(NoteLetter::C, N), spelling);
        assert_eq!(scale.name(), None);
        assert_eq!(scale.to_string(), "C");

        let shorter = MAJOR[..6].to_vec();
        assert_eq!(ScaleName::find(&shorter), None);
    }

    #[test]
    fn test_registry_spellings_are_distinct() {
        for (i, a) in ScaleName::ALL.iter().enumerate() {
            for b in &ScaleName::ALL[i + 1..] {
                assert_ne!(a.spelling(), b.spelling(), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_blues_scale() {
        let scale = Scale::new(key(NoteLetter::C, N), ScaleName::Blues);
        assert_eq!(labels(&scale), vec!["C", "E♭", "F", "G♭", "G", "B♭"]);
    }

    #[test]
    fn test_diminished_uses_double_flat() {
        let scale = Scale::new(key(NoteLetter::C, N), ScaleName::WholeHalfDiminished);
        assert_eq!(
            labels(&scale),
            vec!["C", "D", "E♭", "F", "G♭", "A♭", "B𝄫", "B"]
        );
    }

    #[test]
    fn test_lydian_on_sharp_key() {
        let scale = Scale::new(key(NoteLetter::B, N), ScaleName::LydianMode);
        assert_eq!(labels(&scale), vec!["B", "C♯", "D♯", "E♯", "F♯", "G♯", "A♯"]);
    }

    #[test]
    fn test_scale_name_slugs() {
        for name in ScaleName::ALL {
            assert_eq!(ScaleName::from_slug(name.slug()), Some(name));
        }
        assert_eq!(ScaleName::from_slug("Natural Minor"), Some(ScaleName::NaturalMinor));
        assert_eq!(ScaleName::from_slug("harmonic_minor"), Some(ScaleName::HarmonicMinor));
        assert_eq!(ScaleName::from_slug("bebop"), None);
    }

    #[test]
    fn test_describe() {
        let scale = Scale::new(key(NoteLetter::A, N), ScaleName::NaturalMinorPentatonic);
        assert_eq!(
            scale.describe(&RenderOptions::default()),
            "A Natural Minor Pentatonic\n\
             1 - 3♭ - 4 - 5 - 7♭ - 8\n\
             \n\
             1. A\n\
             2. C\n\
             3. D\n\
             4. E\n\
             5. G\n\
             6. A\n"
        );
    }
}
