// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Hyphenated chord names, e.g. `c-minor7-flat5th` or `b-flat-major-add9`.
//!
//! Layout: `root [-accidental] -quality[digits] [-alteration] [-add...]`.
//! Matching is by substring, so `dim7`, `minor13` and `flat5th` are all
//! picked out of their segment.

use tracing::debug;

use crate::music::{
    Accidental, Chord, IntervalSpec, Key, NoteLetter, TheoryError, TheoryResult, TriadQuality,
};

/// A segment found anywhere in this list is taken as the root accidental
const ACCIDENTAL_WORDS: &str = "sharp:flat:doublesharp:doubleflat";

/// Quality markers in priority order, with the 7th each one implies
const QUALITY_MARKERS: [(&str, TriadQuality, Accidental); 4] = [
    ("major", TriadQuality::Major, Accidental::Natural),
    ("minor", TriadQuality::Minor, Accidental::Flat),
    ("dim", TriadQuality::Diminished, Accidental::DoubleFlat),
    ("dominant", TriadQuality::Major, Accidental::Flat),
];

/// Parse a chord name. `Ok(None)` means the name is well formed up to the
/// root but carries no recognizable quality.
pub fn parse_chord_name(name: &str) -> TheoryResult<Option<Chord>> {
    let lowered = name.trim().to_lowercase();
    let segments: Vec<&str> = lowered.split('-').filter(|s| !s.is_empty()).collect();

    if segments.len() < 2 {
        return Err(TheoryError::MalformedChord(format!(
            "{:?} needs a root and a quality",
            name
        )));
    }

    let root = segments[0];
    if root.chars().count() != 1 {
        return Err(TheoryError::MalformedChord(format!(
            "root {:?} must be a single letter",
            root
        )));
    }
    let letter = NoteLetter::parse(root)?;

    let mut rest = &segments[1..];
    let accidental = match rest.first() {
        Some(word) if ACCIDENTAL_WORDS.contains(word) => {
            rest = &rest[1..];
            accidental_word(word)
        }
        _ => Accidental::Natural,
    };

    let key = Key::new(letter, accidental)?;

    let Some((quality_token, mut tail)) = rest.split_first() else {
        debug!(input = name, "no quality after root");
        return Ok(None);
    };

    let Some((marker, quality, mut seventh)) = QUALITY_MARKERS
        .iter()
        .copied()
        .find(|(marker, _, _)| quality_token.contains(marker))
    else {
        debug!(input = name, token = *quality_token, "unrecognized chord quality");
        return Ok(None);
    };

    let mut top_degree = quality_token.replace(marker, "").parse::<u8>().ok();

    // `major-7` spells the number as its own segment
    if top_degree.is_none() {
        if let Some(degree) = tail.first().and_then(|s| digits_only(s)) {
            top_degree = Some(degree);
            tail = &tail[1..];
            if seventh == Accidental::Natural {
                seventh = Accidental::Flat;
            }
        }
    }

    debug!(input = name, %quality, ?top_degree, "parsed chord quality");

    let mut chord = Chord::new(key.clone(), quality)?;
    let is_triad = top_degree.is_none();

    if let Some(top) = top_degree {
        let mut degree = top;
        while degree > 5 {
            let accidental = if degree == 7 {
                seventh
            } else {
                Accidental::Natural
            };
            chord = chord.add_extension(IntervalSpec::new(degree, accidental));
            degree -= 2;
        }
    }

    if let Some(alteration) = tail.first() {
        let third = chord.third().map(|t| t.accidental());
        if alteration.contains("sharp5th") {
            debug!(input = name, "raising fifth");
            chord = if is_triad && third == Some(Accidental::Natural) {
                Chord::new(key.clone(), TriadQuality::Augmented)?
            } else {
                chord.raise_fifth()?
            };
        } else if alteration.contains("flat5th") {
            debug!(input = name, "lowering fifth");
            chord = if is_triad && third == Some(Accidental::Flat) {
                Chord::new(key.clone(), TriadQuality::Diminished)?
            } else {
                chord.lower_fifth()?
            };
        }
    }

    // The add clause may share the quality segment, e.g. `major7add9`
    if let Some(adds) = rest.last().filter(|s| s.contains("add")) {
        for spec in adds.split("add").filter_map(add_fragment) {
            debug!(input = name, degree = spec.degree(), "adding note");
            chord = chord.add_extension(spec);
        }
    }

    Ok(Some(chord))
}

fn accidental_word(word: &str) -> Accidental {
    match word {
        "flat" => Accidental::Flat,
        "doubleflat" => Accidental::DoubleFlat,
        "sharp" => Accidental::Sharp,
        "doublesharp" => Accidental::DoubleSharp,
        _ => Accidental::Natural,
    }
}

fn digits_only(segment: &str) -> Option<u8> {
    if segment.chars().all(|c| c.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}

/// `9`, `flat13`, `sharp11`; degree 0 and anything unparsable are skipped
fn add_fragment(fragment: &str) -> Option<IntervalSpec> {
    let (accidental, digits) = if fragment.contains("sharp") {
        (Accidental::Sharp, fragment.replace("sharp", ""))
    } else if fragment.contains("flat") {
        (Accidental::Flat, fragment.replace("flat", ""))
    } else {
        (Accidental::Natural, fragment.to_string())
    };

    digits
        .parse::<u8>()
        .ok()
        .filter(|&degree| degree > 0)
        .map(|degree| IntervalSpec::new(degree, accidental))
}
