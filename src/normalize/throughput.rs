// src/normalize/throughput.rs

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

const FIELD: &str = "throughput";

static THROUGHPUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<value>\d+(?:[.,]\d+)*)\s+(?P<unit>\S.*?)\s*$").expect("throughput regex should compile")
});

/// `"<number> <unit>"` with the unit folded onto `TFLOPS`, `GFLOPS` or
/// `TFLOPS (FP4-Sparse)`. Any other unit is rejected.
pub fn normalize_throughput(text: &str) -> Result<String> {
    let caps = THROUGHPUT
        .captures(text)
        .ok_or_else(|| Error::unrecognized(FIELD, text, "expected `<number> <unit>`"))?;

    let unit = match &caps["unit"] {
        "TOPS" | "TOPs" | "TFLOPS" => "TFLOPS",
        "GFLOPS" => "GFLOPS",
        "TFLOPS (FP4\u{2014}Sparse)" => "TFLOPS (FP4-Sparse)",
        other => {
            return Err(Error::unrecognized(
                FIELD,
                text,
                format!("unrecognized unit `{}`", other),
            ))
        }
    };

    Ok(format!("{} {}", &caps["value"], unit))
}
