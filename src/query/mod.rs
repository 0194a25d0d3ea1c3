// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Front-door lookups.
//!
//! Each query names a key, a key signature, a scale, a triad or a chord and
//! comes back as a rendered text block. A missing key signature or an
//! unrecognized chord name is `Answer::NotFound`, not an error.

use std::fmt;

use tracing::debug;

use crate::config::TonalConfig;
use crate::music::{
    Accidental, Key, NoteLetter, Scale, ScaleName, TheoryResult, Triad, TriadQuality,
};
use crate::parser::parse_chord_name;

/// Search a key by how many sharps or flats it carries. Any count is
/// accepted; above 14 there is no such key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySignature {
    Sharps(u32),
    Flats(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Key {
        letter: NoteLetter,
        accidental: Accidental,
    },
    KeySearch(KeySignature),
    Scale {
        letter: NoteLetter,
        accidental: Accidental,
        name: ScaleName,
    },
    Triad {
        letter: NoteLetter,
        accidental: Accidental,
        quality: TriadQuality,
    },
    Chord {
        name: String,
    },
}

/// Rendered result of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Found(String),
    NotFound,
}

impl Answer {
    pub fn is_found(&self) -> bool {
        matches!(self, Answer::Found(_))
    }
}

impl From<Option<String>> for Answer {
    fn from(text: Option<String>) -> Self {
        text.map_or(Answer::NotFound, Answer::Found)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Found(text) => f.write_str(text),
            Answer::NotFound => f.write_str("not found"),
        }
    }
}

fn key_for(letter: NoteLetter, accidental: Accidental, config: &TonalConfig) -> TheoryResult<Key> {
    Key::with_options(letter, accidental, config.keys.allow_double_accidentals)
}

/// Answer a query using the display and key settings from `config`
pub fn answer(query: &Query, config: &TonalConfig) -> TheoryResult<Answer> {
    debug!(?query, "answering query");
    let opts = &config.display;

    let answer = match query {
        Query::Key { letter, accidental } => {
            Answer::Found(key_for(*letter, *accidental, config)?.describe(opts))
        }
        Query::KeySearch(KeySignature::Sharps(count)) => u8::try_from(*count)
            .ok()
            .and_then(Key::with_sharps)
            .map(|key| key.describe(opts))
            .into(),
        Query::KeySearch(KeySignature::Flats(count)) => u8::try_from(*count)
            .ok()
            .and_then(Key::with_flats)
            .map(|key| key.describe(opts))
            .into(),
        Query::Scale {
            letter,
            accidental,
            name,
        } => {
            let key = key_for(*letter, *accidental, config)?;
            Answer::Found(Scale::new(key, *name).describe(opts))
        }
        Query::Triad {
            letter,
            accidental,
            quality,
        } => {
            let key = key_for(*letter, *accidental, config)?;
            Answer::Found(Triad::new(key, *quality)?.describe(opts))
        }
        Query::Chord { name } => parse_chord_name(name)?
            .map(|chord| chord.describe(opts))
            .into(),
    };

    Ok(answer)
}
