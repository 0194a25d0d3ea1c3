// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Result};
use std::env;
use tonal::config::{TonalConfig, CONFIG_ENV};
use tonal::logging::init_tracing;
use tonal::{
    answer, Accidental, Answer, KeySignature, NoteLetter, Query, ScaleName, TheoryError,
    TriadQuality,
};

fn print_usage() {
    println!("Tonal - Keys, scales and chords");
    println!();
    println!("Usage: tonal [--config <PATH>] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --key <LETTER> [ACCIDENTAL]            Show a key and its diatonic notes");
    println!("  --key-sharps <N>                       Find the key with N sharps (0-14)");
    println!("  --key-flats <N>                        Find the key with N flats (0-14)");
    println!("  --scale <LETTER> [ACCIDENTAL] <NAME>   Show a named scale");
    println!("  --triad <LETTER> [ACCIDENTAL] <NAME>   Show a triad");
    println!("  --chord <NAME>                         Parse a chord name, e.g. c-minor7-flat5th");
    println!("  --list-scales                          List scale names");
    println!("  --list-triads                          List triad names");
    println!("  --help                                 Show this help message");
    println!();
    println!("Accidentals: natural, sharp, double-sharp, flat, double-flat");
    println!("Config is read from --config or ${}, YAML or TOML", CONFIG_ENV);
}

fn print_scales() {
    println!("Scales:");
    for name in ScaleName::ALL {
        println!("  {:<26} {}", name.slug(), name);
    }
}

fn print_triads() {
    println!("Triads:");
    for quality in TriadQuality::ALL {
        println!("  {:<12} {:<6} {}", quality.slug(), quality.symbol(), quality);
    }
}

fn parse_accidental(s: &str) -> Result<Accidental, TheoryError> {
    Accidental::from_slug(s).ok_or_else(|| TheoryError::UnknownName {
        kind: "accidental",
        name: s.to_string(),
    })
}

/// `<letter> [accidental]`
fn parse_root(args: &[String]) -> Result<(NoteLetter, Accidental)> {
    let letter = NoteLetter::parse(&args[0])?;
    let accidental = match args.get(1) {
        Some(s) => parse_accidental(s)?,
        None => Accidental::Natural,
    };
    Ok((letter, accidental))
}

/// `<letter> [accidental] <name>`, split into root arguments and the name
fn split_named(args: &[String]) -> Option<(&[String], &String)> {
    match args.len() {
        2 | 3 => args.split_last().map(|(name, root)| (root, name)),
        _ => None,
    }
}

/// Any run of digits is a count; too many accidentals is answered as not
/// found, so oversized counts saturate instead of failing
fn parse_count(flag: &str, args: &[String]) -> Result<u32> {
    let count = args
        .first()
        .ok_or_else(|| anyhow!("{} requires a count", flag))?;
    if count.is_empty() || !count.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Invalid count for {}: {}", flag, count));
    }
    Ok(count.parse().unwrap_or(u32::MAX))
}

/// Pull `--config <path>` out of the argument list
fn take_config_path(args: &mut Vec<String>) -> Result<Option<String>> {
    match args.iter().position(|arg| arg == "--config") {
        Some(index) => {
            if index + 1 >= args.len() {
                return Err(anyhow!("--config requires a path"));
            }
            let path = args.remove(index + 1);
            args.remove(index);
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

fn load_config(args: &mut Vec<String>) -> Result<TonalConfig> {
    let path = match take_config_path(args)? {
        Some(path) => Some(path),
        None => env::var(CONFIG_ENV).ok().filter(|path| !path.is_empty()),
    };

    match path {
        Some(path) => TonalConfig::load(path),
        None => Ok(TonalConfig::default()),
    }
}

fn print_answer(answer: &Answer) {
    match answer {
        Answer::Found(text) => print!("{}", text),
        Answer::NotFound => println!("{}", answer),
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config = load_config(&mut args)?;
    init_tracing(&config.log.level)?;

    if args.is_empty() {
        println!("Tonal - Keys, scales and chords");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let command = args[0].as_str();
    let rest = &args[1..];

    let query = match command {
        "--key" => {
            if rest.is_empty() || rest.len() > 2 {
                eprintln!("Error: --key requires a letter and an optional accidental");
                std::process::exit(1);
            }
            let (letter, accidental) = parse_root(rest)?;
            Query::Key { letter, accidental }
        }
        "--key-sharps" => Query::KeySearch(KeySignature::Sharps(parse_count(command, rest)?)),
        "--key-flats" => Query::KeySearch(KeySignature::Flats(parse_count(command, rest)?)),
        "--scale" => {
            let Some((root, name)) = split_named(rest) else {
                eprintln!("Error: --scale requires a letter, an optional accidental and a scale name");
                eprintln!("Use --list-scales to see available scales");
                std::process::exit(1);
            };
            let (letter, accidental) = parse_root(root)?;
            let name = ScaleName::from_slug(name).ok_or_else(|| TheoryError::UnknownName {
                kind: "scale",
                name: name.clone(),
            })?;
            Query::Scale {
                letter,
                accidental,
                name,
            }
        }
        "--triad" => {
            let Some((root, name)) = split_named(rest) else {
                eprintln!("Error: --triad requires a letter, an optional accidental and a triad name");
                eprintln!("Use --list-triads to see available triads");
                std::process::exit(1);
            };
            let (letter, accidental) = parse_root(root)?;
            let quality = TriadQuality::from_slug(name).ok_or_else(|| TheoryError::UnknownName {
                kind: "triad",
                name: name.clone(),
            })?;
            Query::Triad {
                letter,
                accidental,
                quality,
            }
        }
        "--chord" => {
            let Some(name) = rest.first() else {
                eprintln!("Error: --chord requires a chord name, e.g. c-minor7-flat5th");
                std::process::exit(1);
            };
            Query::Chord { name: name.clone() }
        }
        "--list-scales" => {
            print_scales();
            return Ok(());
        }
        "--list-triads" => {
            print_triads();
            return Ok(());
        }
        "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        _ => {
            eprintln!("Unknown option: {}", command);
            print_usage();
            std::process::exit(1);
        }
    };

    print_answer(&answer(&query, &config)?);
    Ok(())
}
