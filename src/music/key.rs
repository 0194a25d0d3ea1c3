// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key signatures on the circle of fifths.
//!
//! A key is a root spelling plus a count of sharps or flats (never both).
//! Its seven diatonic notes, one per letter, are derived from the count by
//! walking the fixed flat order (B E A D G C F) or sharp order
//! (F C G D A E B); counts above 7 go round again and double up.

use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, trace};

use super::error::{TheoryError, TheoryResult};
use super::note::{Accidental, NoteLetter, PitchName};
use super::render::RenderOptions;

/// Largest number of sharps or flats a key may carry
pub const MAX_ACCIDENTALS: u8 = 14;

/// Letters in the order flats are added to a signature
const FLATS_ORDER: [NoteLetter; 7] = [
    NoteLetter::B,
    NoteLetter::E,
    NoteLetter::A,
    NoteLetter::D,
    NoteLetter::G,
    NoteLetter::C,
    NoteLetter::F,
];

/// Letters in the order sharps are added to a signature
const SHARPS_ORDER: [NoteLetter; 7] = [
    NoteLetter::F,
    NoteLetter::C,
    NoteLetter::G,
    NoteLetter::D,
    NoteLetter::A,
    NoteLetter::E,
    NoteLetter::B,
];

/// Root letters for 1..=7 sharps (before any extra raise)
const ROOTS_BY_SHARPS: [NoteLetter; 7] = [
    NoteLetter::G,
    NoteLetter::D,
    NoteLetter::A,
    NoteLetter::E,
    NoteLetter::B,
    NoteLetter::F,
    NoteLetter::C,
];

/// Root letters for 1..=7 flats (before any extra lower)
const ROOTS_BY_FLATS: [NoteLetter; 7] = [
    NoteLetter::F,
    NoteLetter::B,
    NoteLetter::E,
    NoteLetter::A,
    NoteLetter::D,
    NoteLetter::G,
    NoteLetter::C,
];

/// A diatonic key signature
#[derive(Debug, Clone)]
pub struct Key {
    root: PitchName,
    sharps: u8,
    flats: u8,
    notes: OnceLock<[PitchName; 7]>,
}

impl Key {
    /// Build a key, collapsing a double-sharp or double-flat root onto the
    /// neighbouring natural letter first
    pub fn new(letter: NoteLetter, accidental: Accidental) -> TheoryResult<Self> {
        Self::with_options(letter, accidental, false)
    }

    /// Build a key keeping a double-accidental root as spelled
    pub fn new_exact(letter: NoteLetter, accidental: Accidental) -> TheoryResult<Self> {
        Self::with_options(letter, accidental, true)
    }

    pub fn with_options(
        letter: NoteLetter,
        accidental: Accidental,
        allow_double_accidentals: bool,
    ) -> TheoryResult<Self> {
        let root = if allow_double_accidentals {
            PitchName::new(letter, accidental)
        } else {
            collapse_double(PitchName::new(letter, accidental))
        };

        let (sharps, flats) = signature(root)?;

        Ok(Self {
            root,
            sharps,
            flats,
            notes: OnceLock::new(),
        })
    }

    /// The key carrying exactly `count` sharps, or `None` above 14
    pub fn with_sharps(count: u8) -> Option<Self> {
        if count > MAX_ACCIDENTALS {
            return None;
        }

        let position = usize::from(count % 7);
        let letter = if position == 0 {
            NoteLetter::C
        } else {
            ROOTS_BY_SHARPS[position - 1]
        };

        let mut accidental = if letter == NoteLetter::F {
            Accidental::Sharp
        } else {
            Accidental::Natural
        };
        for _ in 0..count / 7 {
            accidental = accidental.raise_strict().ok()?;
        }

        Self::new_exact(letter, accidental).ok()
    }

    /// The key carrying exactly `count` flats, or `None` above 14
    pub fn with_flats(count: u8) -> Option<Self> {
        if count > MAX_ACCIDENTALS {
            return None;
        }

        let position = usize::from(count % 7);
        let letter = if position == 0 {
            NoteLetter::C
        } else {
            ROOTS_BY_FLATS[position - 1]
        };

        let mut accidental = match letter {
            NoteLetter::F | NoteLetter::C => Accidental::Natural,
            _ => Accidental::Flat,
        };
        for _ in 0..count / 7 {
            accidental = accidental.lower_strict().ok()?;
        }

        Self::new_exact(letter, accidental).ok()
    }

    pub fn root(&self) -> PitchName {
        self.root
    }

    pub fn sharps(&self) -> u8 {
        self.sharps
    }

    pub fn flats(&self) -> u8 {
        self.flats
    }

    /// The seven spelled notes, starting at the root letter
    pub fn diatonic_notes(&self) -> &[PitchName; 7] {
        self.notes.get_or_init(|| {
            trace!(root = %self.root, "spelling diatonic notes");
            spell_diatonic(self.root.letter(), self.sharps, self.flats)
        })
    }

    /// Root line, a blank line, then degrees 1-7 and the octave
    pub fn describe(&self, opts: &RenderOptions) -> String {
        let notes = self.diatonic_notes();
        let mut out = format!("{}\n\n", opts.pitch(self.root));
        for (i, note) in notes.iter().chain(notes.first()).enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, opts.pitch(*note)));
        }
        out
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.sharps == other.sharps && self.flats == other.flats
    }
}

impl Eq for Key {}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(&RenderOptions::default()))
    }
}

/// Map a double-accidental root onto the adjacent natural letter
fn collapse_double(root: PitchName) -> PitchName {
    let collapsed = match root.accidental() {
        Accidental::DoubleFlat => PitchName::natural(root.letter().previous()),
        Accidental::DoubleSharp => PitchName::natural(root.letter().next()),
        _ => return root,
    };
    debug!(from = %root, to = %collapsed, "collapsed double-accidental root");
    collapsed
}

/// (sharps, flats) for a root spelling
fn signature(root: PitchName) -> TheoryResult<(u8, u8)> {
    let letter = root.letter();
    let accidental = root.accidental();

    let (sharps, flats) = match accidental {
        Accidental::Natural => match letter {
            NoteLetter::C => (0, 0),
            NoteLetter::G => (1, 0),
            NoteLetter::D => (2, 0),
            NoteLetter::A => (3, 0),
            NoteLetter::E => (4, 0),
            NoteLetter::B => (5, 0),
            NoteLetter::F => (0, 1),
        },
        Accidental::Flat | Accidental::DoubleFlat => {
            let base = match letter {
                NoteLetter::B => 2,
                NoteLetter::E => 3,
                NoteLetter::A => 4,
                NoteLetter::D => 5,
                NoteLetter::G => 6,
                NoteLetter::C => 7,
                NoteLetter::F => 8,
            };
            (0, if accidental.is_double() { base + 7 } else { base })
        }
        Accidental::Sharp | Accidental::DoubleSharp => {
            let base = match letter {
                NoteLetter::F => 6,
                NoteLetter::C => 7,
                NoteLetter::G => 8,
                NoteLetter::D => 9,
                NoteLetter::A => 10,
                NoteLetter::E => 11,
                NoteLetter::B => 12,
            };
            (if accidental.is_double() { base + 7 } else { base }, 0)
        }
    };

    if sharps > MAX_ACCIDENTALS {
        return Err(TheoryError::InvalidKey {
            root: root.to_string(),
            count: sharps,
            kind: "sharps",
        });
    }
    if flats > MAX_ACCIDENTALS {
        return Err(TheoryError::InvalidKey {
            root: root.to_string(),
            count: flats,
            kind: "flats",
        });
    }

    Ok((sharps, flats))
}

/// Walk `order` cyclically, marking `count` letters. A letter reached a
/// second time is doubled.
fn mark_accidentals(
    slots: &mut [Option<Accidental>; 7],
    order: &[NoteLetter; 7],
    count: u8,
    single: Accidental,
    double: Accidental,
) {
    for letter in order.iter().cycle().take(usize::from(count)) {
        let slot = &mut slots[letter.index()];
        *slot = Some(if slot.is_some() { double } else { single });
    }
}

fn spell_diatonic(root: NoteLetter, sharps: u8, flats: u8) -> [PitchName; 7] {
    // Indexed by letter, A-G
    let mut slots: [Option<Accidental>; 7] = [None; 7];

    mark_accidentals(
        &mut slots,
        &FLATS_ORDER,
        flats,
        Accidental::Flat,
        Accidental::DoubleFlat,
    );
    mark_accidentals(
        &mut slots,
        &SHARPS_ORDER,
        sharps,
        Accidental::Sharp,
        Accidental::DoubleSharp,
    );

    root.cycle_from().map(|letter| {
        PitchName::new(
            letter,
            slots[letter.index()].unwrap_or(Accidental::Natural),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(key: &Key) -> Vec<String> {
        key.diatonic_notes().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_c_major() {
        let key = Key::new(NoteLetter::C, Accidental::Natural).unwrap();
        assert_eq!(key.sharps(), 0);
        assert_eq!(key.flats(), 0);
        assert_eq!(labels(&key), vec!["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn test_natural_roots() {
        let expected = [
            (NoteLetter::C, 0, 0),
            (NoteLetter::G, 1, 0),
            (NoteLetter::D, 2, 0),
            (NoteLetter::A, 3, 0),
            (NoteLetter::E, 4, 0),
            (NoteLetter::B, 5, 0),
            (NoteLetter::F, 0, 1),
        ];

        for (letter, sharps, flats) in expected {
            let key = Key::new(letter, Accidental::Natural).unwrap();
            assert_eq!(key.sharps(), sharps, "sharps for {}", letter);
            assert_eq!(key.flats(), flats, "flats for {}", letter);

            let notes = key.diatonic_notes();
            assert_eq!(notes[0].letter(), letter);
            let altered = notes
                .iter()
                .filter(|n| n.accidental() != Accidental::Natural)
                .count();
            assert_eq!(altered, usize::from(sharps + flats));
        }
    }

    #[test]
    fn test_f_sharp_major() {
        let key = Key::new(NoteLetter::F, Accidental::Sharp).unwrap();
        assert_eq!(key.sharps(), 6);
        assert_eq!(labels(&key), vec!["F♯", "G♯", "A♯", "B", "C♯", "D♯", "E♯"]);
    }

    #[test]
    fn test_flat_keys() {
        let key = Key::new(NoteLetter::E, Accidental::Flat).unwrap();
        assert_eq!(key.flats(), 3);
        assert_eq!(labels(&key), vec!["E♭", "F", "G", "A♭", "B♭", "C", "D"]);

        let key = Key::new(NoteLetter::C, Accidental::Flat).unwrap();
        assert_eq!(key.flats(), 7);
        assert!(key
            .diatonic_notes()
            .iter()
            .all(|n| n.accidental() == Accidental::Flat));
    }

    #[test]
    fn test_double_accidental_root_collapses() {
        // B double-flat collapses to A, D double-sharp to E
        let key = Key::new(NoteLetter::B, Accidental::DoubleFlat).unwrap();
        assert_eq!(key.root(), PitchName::natural(NoteLetter::A));
        assert_eq!(key.sharps(), 3);

        let key = Key::new(NoteLetter::D, Accidental::DoubleSharp).unwrap();
        assert_eq!(key.root(), PitchName::natural(NoteLetter::E));

        let key = Key::new(NoteLetter::A, Accidental::DoubleFlat).unwrap();
        assert_eq!(key.root(), PitchName::natural(NoteLetter::G));

        let key = Key::new(NoteLetter::G, Accidental::DoubleSharp).unwrap();
        assert_eq!(key.root(), PitchName::natural(NoteLetter::A));
    }

    #[test]
    fn test_exact_double_flat_key() {
        let key = Key::new_exact(NoteLetter::B, Accidental::DoubleFlat).unwrap();
        assert_eq!(key.flats(), 9);
        assert_eq!(labels(&key), vec!["B𝄫", "C♭", "D♭", "E𝄫", "F♭", "G♭", "A♭"]);
    }

    #[test]
    fn test_key_over_fourteen_fails() {
        let err = Key::new_exact(NoteLetter::B, Accidental::DoubleSharp).unwrap_err();
        assert_eq!(
            err,
            TheoryError::InvalidKey {
                root: "B𝄪".to_string(),
                count: 19,
                kind: "sharps",
            }
        );
        assert!(Key::new_exact(NoteLetter::F, Accidental::DoubleFlat).is_err());
        assert!(Key::new_exact(NoteLetter::C, Accidental::DoubleFlat).is_ok());
    }

    #[test]
    fn test_with_sharps_inverts_signature() {
        for count in 0..=MAX_ACCIDENTALS {
            let key = Key::with_sharps(count).unwrap();
            assert_eq!(key.sharps(), count, "root {}", key.root());
            assert_eq!(key.flats(), 0);
        }
        assert!(Key::with_sharps(15).is_none());
    }

    #[test]
    fn test_with_flats_inverts_signature() {
        for count in 0..=MAX_ACCIDENTALS {
            let key = Key::with_flats(count).unwrap();
            assert_eq!(key.flats(), count, "root {}", key.root());
            assert_eq!(key.sharps(), 0);
        }
        assert!(Key::with_flats(15).is_none());
    }

    #[test]
    fn test_with_sharps_roots() {
        assert_eq!(Key::with_sharps(0).unwrap().root(), PitchName::natural(NoteLetter::C));
        assert_eq!(
            Key::with_sharps(6).unwrap().root(),
            PitchName::new(NoteLetter::F, Accidental::Sharp)
        );
        assert_eq!(
            Key::with_sharps(7).unwrap().root(),
            PitchName::new(NoteLetter::C, Accidental::Sharp)
        );
        assert_eq!(
            Key::with_sharps(14).unwrap().root(),
            PitchName::new(NoteLetter::C, Accidental::DoubleSharp)
        );
        assert_eq!(
            Key::with_flats(1).unwrap().root(),
            PitchName::natural(NoteLetter::F)
        );
        assert_eq!(
            Key::with_flats(13).unwrap().root(),
            PitchName::new(NoteLetter::G, Accidental::DoubleFlat)
        );
    }

    #[test]
    fn test_double_sharp_spelling_wraps_order() {
        let key = Key::with_sharps(9).unwrap();
        assert_eq!(key.root(), PitchName::new(NoteLetter::D, Accidental::Sharp));
        assert_eq!(labels(&key), vec!["D♯", "E♯", "F𝄪", "G♯", "A♯", "B♯", "C𝄪"]);
    }

    #[test]
    fn test_notes_are_cached() {
        let key = Key::new(NoteLetter::A, Accidental::Flat).unwrap();
        let first = key.diatonic_notes() as *const _;
        let second = key.diatonic_notes() as *const _;
        assert_eq!(first, second);

        let copy = key.clone();
        assert_eq!(copy, key);
        assert_eq!(copy.diatonic_notes(), key.diatonic_notes());
    }

    #[test]
    fn test_describe() {
        let key = Key::new(NoteLetter::D, Accidental::Natural).unwrap();
        assert_eq!(
            key.to_string(),
            "D\n\n1. D\n2. E\n3. F♯\n4. G\n5. A\n6. B\n7. C♯\n8. D\n"
        );

        let opts = RenderOptions {
            show_natural_sign: true,
            ascii_accidentals: true,
        };
        let described = key.describe(&opts);
        assert!(described.starts_with("Dn\n\n1. Dn\n"));
        assert!(described.contains("3. F#\n"));
    }
}
