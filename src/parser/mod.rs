// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text parsers that build music values from names.

pub mod chord_name;

pub use chord_name::parse_chord_name;
