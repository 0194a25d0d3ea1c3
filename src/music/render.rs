// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text rendering options shared by every multi-line description.

use serde::{Deserialize, Serialize};

use super::note::{Accidental, PitchName};

/// How notes and accidentals are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Print ♮ on natural notes instead of leaving them bare
    pub show_natural_sign: bool,
    /// Use `#`, `x`, `b`, `bb`, `n` instead of Unicode glyphs
    pub ascii_accidentals: bool,
}

impl RenderOptions {
    /// Label for a spelled note
    pub fn pitch(&self, pitch: PitchName) -> String {
        pitch.label(self.show_natural_sign, self.ascii_accidentals)
    }

    /// Sign for an interval or chord-symbol accidental. Naturals are always
    /// left out here, whatever `show_natural_sign` says.
    pub fn sign(&self, accidental: Accidental) -> &'static str {
        match accidental {
            Accidental::Natural => "",
            other => other.glyph(self.ascii_accidentals),
        }
    }
}
