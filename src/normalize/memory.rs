// src/normalize/memory.rs

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

const FIELD: &str = "memory";

static MEMORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?P<size>\d+(?:\.\d+)?)\s?GB\s+
        (?P<bits>\d+)-bit\s+
        (?P<gen>[A-Za-z0-9]+)
        (?:\s+\((?P<ecc>[^)]*)\))?
        \s+(?P<speed>\d+(?:\.\d+)?)\s?GB/s
        \s*$",
    )
    .expect("memory regex should compile")
});

/// Rewrite `"<size>GB <bits>-bit <gen>[ (ECC)] <speed>GB/s"` as
/// `"<size> GB <bits>-bit <gen> @ <speed> GB/s[ ECC]"`.
///
/// Size and speed are read as decimals, so `204.8` stays `204.8` and
/// `204.80` becomes `204.8`. A parenthesized marker other than ECC is
/// rejected.
pub fn normalize_memory(text: &str) -> Result<String> {
    let caps = MEMORY.captures(text).ok_or_else(|| {
        Error::unrecognized(
            FIELD,
            text,
            "expected `<size>GB <bits>-bit <generation> [(ECC)] <speed>GB/s`",
        )
    })?;

    let size = decimal(text, &caps["size"])?;
    let speed = decimal(text, &caps["speed"])?;

    let ecc = match caps.name("ecc") {
        None => false,
        Some(m) if m.as_str().trim().eq_ignore_ascii_case("ecc") => true,
        Some(m) => {
            return Err(Error::unrecognized(
                FIELD,
                text,
                format!("unrecognized marker `({})`", m.as_str()),
            ))
        }
    };

    let mut out = format!(
        "{} GB {}-bit {} @ {} GB/s",
        size, &caps["bits"], &caps["gen"], speed
    );
    if ecc {
        out.push_str(" ECC");
    }
    Ok(out)
}

fn decimal(text: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|e| Error::unrecognized(FIELD, text, format!("bad number `{}`: {}", raw, e)))
}
