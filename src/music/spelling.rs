// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Interval specifications: "take the Nth diatonic degree, then alter it".
//!
//! Scales, triads and chords are all lists of these, resolved against the
//! seven spelled notes of a key.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::note::{Accidental, PitchName};
use super::render::RenderOptions;

/// A scale degree plus the accidental applied on top of the key's spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalSpec {
    degree: u8,
    accidental: Accidental,
}

impl IntervalSpec {
    pub const fn new(degree: u8, accidental: Accidental) -> Self {
        Self { degree, accidental }
    }

    pub const fn natural(degree: u8) -> Self {
        Self::new(degree, Accidental::Natural)
    }

    pub fn degree(&self) -> u8 {
        self.degree
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn with_accidental(self, accidental: Accidental) -> Self {
        Self { accidental, ..self }
    }

    /// Index into the key's seven notes. Extensions fold back into the
    /// octave, so 9 lands on 2 and 8 on 1; 7 stays 7.
    pub fn diatonic_index(&self) -> usize {
        (usize::from(self.degree.max(1)) - 1) % 7
    }

    /// Spell this degree against a key's diatonic notes
    pub fn resolve(&self, diatonic: &[PitchName; 7]) -> PitchName {
        diatonic[self.diatonic_index()].alter(self.accidental)
    }

    /// Degree number followed by its accidental sign, e.g. `3♭`
    pub fn label(&self, opts: &RenderOptions) -> String {
        format!("{}{}", self.degree, opts.sign(self.accidental))
    }
}

impl fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(&RenderOptions::default()))
    }
}

/// Resolve a whole spelling against a key's diatonic notes
pub fn resolve_all(specs: &[IntervalSpec], diatonic: &[PitchName; 7]) -> Vec<PitchName> {
    specs.iter().map(|spec| spec.resolve(diatonic)).collect()
}

/// Dash-joined spelling. With `with_octave`, a closing octave entry is
/// appended: one degree above the highest, carrying the first entry's
/// accidental.
pub fn join_labels(specs: &[IntervalSpec], with_octave: bool, opts: &RenderOptions) -> String {
    let mut labels: Vec<String> = specs.iter().map(|spec| spec.label(opts)).collect();

    if with_octave && specs.len() > 1 {
        if let (Some(first), Some(top)) = (specs.first(), specs.iter().map(|s| s.degree).max()) {
            let octave = u16::from(top) + 1;
            labels.push(format!("{}{}", octave, opts.sign(first.accidental)));
        }
    }

    labels.join(" - ")
}
