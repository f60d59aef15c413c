// src/normalize/gpu.rs

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

const FIELD: &str = "gpu";

// <cores>-core NVIDIA <arch>[ architecture] GPU[ with <n> [<gen> ]Tensor Cores][<sep><extra>]
//
// Trailing text must be split off by whitespace or punctuation, so words
// glued onto the grammar ("GPUs", "Coresxyz") are rejected.
static GPU: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?P<cores>\d+)-core\s+NVIDIA\s+
        (?P<arch>.+?)
        (?:\s+architecture)?
        \s+GPU
        (?:\s+with\s+(?P<tensors>\d+)\s+(?:(?P<gen>\S+)\s+)?[Tt]ensor\s+[Cc]ores)?
        (?:[\s,;]+(?P<extra>.*\S))?
        \s*$",
    )
    .expect("gpu regex should compile")
});

static TRADEMARK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2122}\u{00AE}\u{00A9}]|\((?:TM|R|C)\)").expect("trademark regex should compile")
});

static LEADING_AND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^and\s+").expect("conjunction regex should compile"));

/// Rewrite a vendor GPU description as
/// `"<cores>-core <arch>[ with <n> [<gen> ]tensor cores][ and <extra>]"`.
///
/// Trademark glyphs are stripped from the architecture and a zero tensor
/// core count drops the tensor clause altogether.
pub fn normalize_gpu(text: &str) -> Result<String> {
    let caps = GPU.captures(text).ok_or_else(|| {
        Error::unrecognized(
            FIELD,
            text,
            "expected `<cores>-core NVIDIA <arch> [architecture] GPU [with <n> Tensor Cores]`",
        )
    })?;

    let arch = clean_architecture(&caps["arch"]);
    if arch.is_empty() {
        return Err(Error::unrecognized(FIELD, text, "empty architecture name"));
    }

    let mut out = format!("{}-core {}", &caps["cores"], arch);

    if let Some(tensors) = caps.name("tensors") {
        let count: u32 = tensors
            .as_str()
            .parse()
            .map_err(|_| Error::unrecognized(FIELD, text, "tensor core count out of range"))?;
        if count > 0 {
            out.push_str(&format!(" with {} ", count));
            if let Some(gen) = caps.name("gen") {
                out.push_str(gen.as_str());
                out.push(' ');
            }
            out.push_str("tensor cores");
        }
    }

    if let Some(extra) = caps.name("extra") {
        // a `with ...` clause that failed the tensor grammar is not extra text
        if caps.name("tensors").is_none() && extra.as_str().to_lowercase().starts_with("with ") {
            return Err(Error::unrecognized(FIELD, text, "malformed tensor core clause"));
        }
        let extra = LEADING_AND.replace(extra.as_str(), "");
        if !extra.is_empty() {
            out.push_str(" and ");
            out.push_str(&extra);
        }
    }

    Ok(out)
}

fn clean_architecture(raw: &str) -> String {
    let stripped = TRADEMARK.replace_all(raw, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampere_with_tensor_cores() {
        assert_eq!(
            normalize_gpu("2048-core NVIDIA Ampere architecture GPU with 64 Tensor Cores").unwrap(),
            "2048-core Ampere with 64 tensor cores"
        );
    }

    #[test]
    fn tensor_generation_is_kept() {
        assert_eq!(
            normalize_gpu("2560-core NVIDIA Blackwell architecture GPU with 96 fifth-gen Tensor Cores")
                .unwrap(),
            "2560-core Blackwell with 96 fifth-gen tensor cores"
        );
    }

    #[test]
    fn trademark_glyphs_stripped() {
        assert_eq!(
            normalize_gpu("512-core NVIDIA Volta\u{2122} architecture GPU with 64 Tensor Cores").unwrap(),
            "512-core Volta with 64 tensor cores"
        );
        assert_eq!(
            normalize_gpu("256-core NVIDIA Pascal(TM) GPU").unwrap(),
            "256-core Pascal"
        );
    }

    #[test]
    fn zero_tensor_cores_omitted() {
        assert_eq!(
            normalize_gpu("256-core NVIDIA Pascal architecture GPU with 0 Tensor Cores").unwrap(),
            "256-core Pascal"
        );
    }

    #[test]
    fn trailing_text_is_joined() {
        assert_eq!(
            normalize_gpu(
                "2560-core NVIDIA Blackwell architecture GPU with 96 fifth-gen Tensor Cores, Multi-Instance GPU with 10 TPCs"
            )
            .unwrap(),
            "2560-core Blackwell with 96 fifth-gen tensor cores and Multi-Instance GPU with 10 TPCs"
        );
        assert_eq!(
            normalize_gpu("1024-core NVIDIA Ampere architecture GPU with 32 Tensor Cores and 2x NVDLA")
                .unwrap(),
            "1024-core Ampere with 32 tensor cores and 2x NVDLA"
        );
    }

    #[test]
    fn non_matching_text_fails() {
        for bad in [
            "NVIDIA Maxwell architecture with 128 NVIDIA CUDA cores",
            "128-core Maxwell",
            "2048-core NVIDIA Ampere architecture GPUs",
            "2048-core NVIDIA Ampere architecture GPU with 64 Tensor Coresxyz",
            "",
        ] {
            match normalize_gpu(bad) {
                Err(Error::UnrecognizedField { field, .. }) => assert_eq!(field, "gpu"),
                other => panic!("expected UnrecognizedField for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn deterministic() {
        for input in [
            "2048-core NVIDIA Ampere architecture GPU with 64 Tensor Cores",
            "512-core NVIDIA Volta\u{2122} architecture GPU with 64 Tensor Cores",
            "1024-core NVIDIA Ampere architecture GPU with 32 Tensor Cores and 2x NVDLA",
        ] {
            assert_eq!(normalize_gpu(input).unwrap(), normalize_gpu(input).unwrap());
        }
    }
}
