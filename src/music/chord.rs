// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Triads, extended chords and chord symbols.
//!
//! A triad is three interval specs over a key (root and fifth always among
//! them). A chord is a triad plus numbered extensions; its symbol is worked
//! out from the stack of degrees, e.g. `C7`, `C−9`, `CΔ add9`, `C−7♭5`.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::{TheoryError, TheoryResult};
use super::key::Key;
use super::note::{Accidental, PitchName};
use super::render::RenderOptions;
use super::spelling::{join_labels, resolve_all, IntervalSpec};

const MAJOR: [IntervalSpec; 3] = [
    IntervalSpec::natural(1),
    IntervalSpec::natural(3),
    IntervalSpec::natural(5),
];
const MINOR: [IntervalSpec; 3] = [
    IntervalSpec::natural(1),
    IntervalSpec::new(3, Accidental::Flat),
    IntervalSpec::natural(5),
];
const DIMINISHED: [IntervalSpec; 3] = [
    IntervalSpec::natural(1),
    IntervalSpec::new(3, Accidental::Flat),
    IntervalSpec::new(5, Accidental::Flat),
];
const AUGMENTED: [IntervalSpec; 3] = [
    IntervalSpec::natural(1),
    IntervalSpec::natural(3),
    IntervalSpec::new(5, Accidental::Sharp),
];
const SUS2: [IntervalSpec; 3] = [
    IntervalSpec::natural(1),
    IntervalSpec::natural(2),
    IntervalSpec::natural(5),
];
const SUS4: [IntervalSpec; 3] = [
    IntervalSpec::natural(1),
    IntervalSpec::natural(4),
    IntervalSpec::natural(5),
];
const POWER_CHORD: [IntervalSpec; 3] = [
    IntervalSpec::natural(1),
    IntervalSpec::natural(5),
    IntervalSpec::natural(8),
];

/// Triad qualities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    PowerChord,
}

impl TriadQuality {
    pub const ALL: [TriadQuality; 7] = [
        TriadQuality::Major,
        TriadQuality::Minor,
        TriadQuality::Diminished,
        TriadQuality::Augmented,
        TriadQuality::Sus2,
        TriadQuality::Sus4,
        TriadQuality::PowerChord,
    ];

    pub fn spelling(self) -> &'static [IntervalSpec] {
        match self {
            TriadQuality::Major => &MAJOR,
            TriadQuality::Minor => &MINOR,
            TriadQuality::Diminished => &DIMINISHED,
            TriadQuality::Augmented => &AUGMENTED,
            TriadQuality::Sus2 => &SUS2,
            TriadQuality::Sus4 => &SUS4,
            TriadQuality::PowerChord => &POWER_CHORD,
        }
    }

    /// Short label used in chord symbols
    pub fn symbol(self) -> &'static str {
        match self {
            TriadQuality::Major => "Δ",
            TriadQuality::Minor => "−",
            TriadQuality::Diminished => "°",
            TriadQuality::Augmented => "+",
            TriadQuality::Sus2 => "sus2",
            TriadQuality::Sus4 => "sus4",
            TriadQuality::PowerChord => "5",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TriadQuality::Major => "Major",
            TriadQuality::Minor => "Minor",
            TriadQuality::Diminished => "Diminished",
            TriadQuality::Augmented => "Augmented",
            TriadQuality::Sus2 => "Suspended 2nd",
            TriadQuality::Sus4 => "Suspended 4th",
            TriadQuality::PowerChord => "5th (Power Chord)",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            TriadQuality::Major => "major",
            TriadQuality::Minor => "minor",
            TriadQuality::Diminished => "diminished",
            TriadQuality::Augmented => "augmented",
            TriadQuality::Sus2 => "sus2",
            TriadQuality::Sus4 => "sus4",
            TriadQuality::PowerChord => "power-chord",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '_'], "-");
        TriadQuality::ALL.into_iter().find(|q| q.slug() == s)
    }
}

impl fmt::Display for TriadQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exactly three specs, one of them the root and one the fifth
fn check_triad_spelling(spelling: &[IntervalSpec]) -> TheoryResult<()> {
    if spelling.len() != 3 {
        return Err(TheoryError::MalformedTriad(format!(
            "expected 3 notes, found {}",
            spelling.len()
        )));
    }
    if !spelling.iter().any(|s| s.degree() == 1) {
        return Err(TheoryError::MalformedTriad("Root is required.".to_string()));
    }
    if !spelling.iter().any(|s| s.degree() == 5) {
        return Err(TheoryError::MalformedTriad("Fifth is required.".to_string()));
    }
    Ok(())
}

/// Symbol line, spelling line, blank line, then one `<spec> .. <note>` row
/// per note
fn describe_block(
    symbol: &str,
    spelling: &[IntervalSpec],
    notes: &[PitchName],
    opts: &RenderOptions,
) -> String {
    let mut out = format!("{}\n{}\n\n", symbol, join_labels(spelling, false, opts));
    for (spec, note) in spelling.iter().zip(notes) {
        let label = spec.label(opts);
        let leader = if label.chars().count() == 2 { ".." } else { "..." };
        out.push_str(&format!("{} {} {}\n", label, leader, opts.pitch(*note)));
    }
    out
}

/// A three-note chord
#[derive(Debug, Clone)]
pub struct Triad {
    key: Key,
    quality: TriadQuality,
    spelling: Vec<IntervalSpec>,
    notes: OnceLock<Vec<PitchName>>,
}

impl Triad {
    pub fn new(key: Key, quality: TriadQuality) -> TheoryResult<Self> {
        let spelling = quality.spelling();
        check_triad_spelling(spelling)?;

        let mut spelling = spelling.to_vec();
        spelling.sort_by_key(|s| s.degree());

        Ok(Self {
            key,
            quality,
            spelling,
            notes: OnceLock::new(),
        })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn quality(&self) -> TriadQuality {
        self.quality
    }

    /// The three specs, ordered by degree
    pub fn spelling(&self) -> &[IntervalSpec] {
        &self.spelling
    }

    /// `None` for suspended and power chords
    pub fn third(&self) -> Option<IntervalSpec> {
        self.spec_at(3)
    }

    pub fn fifth(&self) -> IntervalSpec {
        self.spec_at(5).unwrap_or_else(|| IntervalSpec::natural(5))
    }

    fn spec_at(&self, degree: u8) -> Option<IntervalSpec> {
        self.spelling.iter().copied().find(|s| s.degree() == degree)
    }

    /// Copy of this triad with the fifth re-spelled
    fn with_fifth(&self, accidental: Accidental) -> Self {
        let spelling = self
            .spelling
            .iter()
            .map(|s| {
                if s.degree() == 5 {
                    s.with_accidental(accidental)
                } else {
                    *s
                }
            })
            .collect();
        Self {
            key: self.key.clone(),
            quality: self.quality,
            spelling,
            notes: OnceLock::new(),
        }
    }

    pub fn notes(&self) -> &[PitchName] {
        self.notes.get_or_init(|| {
            trace!(triad = %self, "spelling triad notes");
            resolve_all(&self.spelling, self.key.diatonic_notes())
        })
    }

    /// Root followed by the quality label, e.g. `C−`
    pub fn symbol(&self, opts: &RenderOptions) -> String {
        format!(
            "{}{}",
            self.key.root().label(false, opts.ascii_accidentals),
            self.quality.symbol()
        )
    }

    pub fn describe(&self, opts: &RenderOptions) -> String {
        describe_block(&self.symbol(opts), &self.spelling, self.notes(), opts)
    }
}

impl PartialEq for Triad {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.quality == other.quality && self.spelling == other.spelling
    }
}

impl fmt::Display for Triad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol(&RenderOptions::default()))
    }
}

/// Chord extensions beyond the triad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extension {
    Sixth,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Extension {
    pub fn degree(self) -> u8 {
        match self {
            Extension::Sixth => 6,
            Extension::Seventh => 7,
            Extension::Ninth => 9,
            Extension::Eleventh => 11,
            Extension::Thirteenth => 13,
        }
    }
}

/// A triad with extensions
#[derive(Debug, Clone)]
pub struct Chord {
    triad: Triad,
    /// Insertion order, at most one entry per degree
    extensions: Vec<IntervalSpec>,
    notes: OnceLock<Vec<PitchName>>,
}

impl Chord {
    pub fn new(key: Key, quality: TriadQuality) -> TheoryResult<Self> {
        Ok(Self::from_triad(Triad::new(key, quality)?))
    }

    pub fn from_triad(triad: Triad) -> Self {
        Self {
            triad,
            extensions: Vec::new(),
            notes: OnceLock::new(),
        }
    }

    /// Build a chord and add each extension in order
    pub fn with_extensions(
        key: Key,
        quality: TriadQuality,
        extensions: &[(Extension, Accidental)],
    ) -> TheoryResult<Self> {
        let chord = Self::new(key, quality)?;
        Ok(extensions
            .iter()
            .fold(chord, |chord, &(extension, accidental)| chord.add(extension, accidental)))
    }

    pub fn triad(&self) -> &Triad {
        &self.triad
    }

    pub fn key(&self) -> &Key {
        self.triad.key()
    }

    pub fn quality(&self) -> TriadQuality {
        self.triad.quality()
    }

    pub fn third(&self) -> Option<IntervalSpec> {
        self.triad.third()
    }

    pub fn fifth(&self) -> IntervalSpec {
        self.triad.fifth()
    }

    /// Extensions in the order they were added
    pub fn extensions(&self) -> &[IntervalSpec] {
        &self.extensions
    }

    /// Accidental of an extension degree, if present
    pub fn extension(&self, degree: u8) -> Option<Accidental> {
        self.extensions
            .iter()
            .find(|s| s.degree() == degree)
            .map(|s| s.accidental())
    }

    /// Triad and extensions together, ordered by degree
    pub fn spelling(&self) -> Vec<IntervalSpec> {
        let mut spelling: Vec<IntervalSpec> = self
            .triad
            .spelling()
            .iter()
            .chain(&self.extensions)
            .copied()
            .collect();
        spelling.sort_by_key(|s| s.degree());
        spelling
    }

    /// Shorthand for `add_extension` with a named extension
    pub fn add(&self, extension: Extension, accidental: Accidental) -> Self {
        self.add_extension(IntervalSpec::new(extension.degree(), accidental))
    }

    /// Copy of this chord with one more extension. A 6th and a 7th never
    /// coexist: whichever comes second is dropped. Re-adding a degree
    /// replaces its accidental.
    pub fn add_extension(&self, spec: IntervalSpec) -> Self {
        let clashes = match spec.degree() {
            6 => self.extension(7).is_some(),
            7 => self.extension(6).is_some(),
            _ => false,
        };
        if clashes {
            debug!(chord = %self, degree = spec.degree(), "6th and 7th are exclusive, extension dropped");
            return self.clone();
        }

        let mut extensions = self.extensions.clone();
        match extensions.iter_mut().find(|s| s.degree() == spec.degree()) {
            Some(existing) => *existing = spec,
            None => extensions.push(spec),
        }

        Self {
            triad: self.triad.clone(),
            extensions,
            notes: OnceLock::new(),
        }
    }

    /// Copy with the fifth raised one step
    pub fn raise_fifth(&self) -> TheoryResult<Self> {
        let accidental = self.fifth().accidental().raise_strict()?;
        Ok(self.with_triad(self.triad.with_fifth(accidental)))
    }

    /// Copy with the fifth lowered one step
    pub fn lower_fifth(&self) -> TheoryResult<Self> {
        let accidental = self.fifth().accidental().lower_strict()?;
        Ok(self.with_triad(self.triad.with_fifth(accidental)))
    }

    fn with_triad(&self, triad: Triad) -> Self {
        Self {
            triad,
            extensions: self.extensions.clone(),
            notes: OnceLock::new(),
        }
    }

    pub fn notes(&self) -> &[PitchName] {
        self.notes.get_or_init(|| {
            trace!(chord = %self, "spelling chord notes");
            resolve_all(&self.spelling(), self.key().diatonic_notes())
        })
    }

    /// The chord symbol
    pub fn symbol(&self, opts: &RenderOptions) -> String {
        let quality = self.quality();
        let fifth = self.fifth();

        // Augmented and diminished already say what the fifth is
        let altered_fifth = if fifth.accidental() != Accidental::Natural
            && !matches!(quality, TriadQuality::Augmented | TriadQuality::Diminished)
        {
            format!("{}5", opts.sign(fifth.accidental()))
        } else {
            String::new()
        };

        if self.extensions.is_empty() {
            return format!("{}{}", self.triad.symbol(opts), altered_fifth);
        }

        let spelling = self.spelling();
        let top = spelling.last().map_or(5, |s| s.degree());
        let seventh = self.extension(7);

        // Fewer notes than a full stack of thirds up to the top degree
        let is_add_chord = spelling.len() < usize::from((top - 1) / 2 + 1);

        // Dominant chords drop the quality label
        let is_dominant = self
            .third()
            .is_some_and(|third| third.accidental() == Accidental::Natural)
            && seventh == Some(Accidental::Flat);

        let mut name = self.key().root().label(false, opts.ascii_accidentals);
        if !is_dominant {
            name.push_str(quality.symbol());
        }

        if !is_add_chord {
            name.push_str(&format!("{}{}", top, altered_fifth));
            return name;
        }

        let mut stacked_to: u8 = if seventh.is_some() { 7 } else { 5 };
        let mut adds = String::new();

        let mut upper: Vec<IntervalSpec> = self
            .extensions
            .iter()
            .copied()
            .filter(|s| s.degree() >= 9)
            .collect();
        upper.sort_by_key(|s| s.degree());

        for spec in upper {
            if !adds.is_empty() || self.extension(spec.degree() - 2).is_none() {
                adds.push_str(&format!(" add{}{}", opts.sign(spec.accidental()), spec.degree()));
            } else {
                stacked_to = spec.degree();
            }
        }

        if stacked_to > 5 {
            name.push_str(&stacked_to.to_string());
        }
        name.push_str(&altered_fifth);
        name.push_str(&adds);
        name
    }

    pub fn describe(&self, opts: &RenderOptions) -> String {
        describe_block(&self.symbol(opts), &self.spelling(), self.notes(), opts)
    }
}

impl From<Triad> for Chord {
    fn from(triad: Triad) -> Self {
        Chord::from_triad(triad)
    }
}

impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.triad == other.triad && self.extensions == other.extensions
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol(&RenderOptions::default()))
    }
}
