//! Clipboard text extraction.
//!
//! A paste either yields exactly the number of values the target field needs
//! or nothing at all, in which case the caller pastes the text literally.

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\(\s*(\d+\.?\d*)\s*,\s*(\d+\.?\d*)\s*,\s*(\d+\.?\d*)\s*\)\s*$")
        .expect("valid regex")
});

static BRACKETS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\[\s*(\d+\.?\d*)\s*,\s*(\d+\.?\d*)\s*,\s*(\d+\.?\d*)\s*\]\s*$")
        .expect("valid regex")
});

static DELIMITED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+\.?\d*)\s*[,;/|\s]\s*(\d+\.?\d*)\s*[,;/|\s]\s*(\d+\.?\d*)\s*$")
        .expect("valid regex")
});

static PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+\.?\d*)%\s*$").expect("valid regex"));

static BARE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([-+]?\d*\.?\d+)\s*$").expect("valid regex"));

static ANY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d*\.?\d+").expect("valid regex"));

/// Three values for an RGB row: `(r, g, b)`, `[r, g, b]`, `r g b` with any of
/// `, ; / |` or whitespace between, or any text with exactly three numbers.
pub fn extract_rgb(text: &str) -> Option<[f64; 3]> {
    let text = text.trim();
    [&*PARENTHESES, &*BRACKETS, &*DELIMITED]
        .into_iter()
        .find_map(|re| captured::<3>(re, text))
        .or_else(|| all_numbers::<3>(text))
}

/// One value for a single-value field: a bare number, a percentage (`20%`
/// yields 20), or any text containing exactly one number.
pub fn extract_single(text: &str) -> Option<f64> {
    let text = text.trim();
    [&*PERCENT, &*BARE_NUMBER]
        .into_iter()
        .find_map(|re| captured::<1>(re, text))
        .or_else(|| all_numbers::<1>(text))
        .map(|[v]| v)
}

/// Exactly `n` values, or `None`. Only 1 and 3 have dedicated grammars; other
/// counts fall back to counting every number in the text.
pub fn extract_exactly_n(text: &str, n: usize) -> Option<Vec<f64>> {
    match n {
        1 => extract_single(text).map(|v| vec![v]),
        3 => extract_rgb(text).map(Vec::from),
        _ => {
            let numbers = numbers(text.trim())?;
            (numbers.len() == n).then_some(numbers)
        }
    }
}

/// What a paste into a single-value field does.
#[derive(Debug, Clone, PartialEq)]
pub enum SinglePaste {
    /// Write the value and commit it.
    Commit(f64),
    /// No single value found: the text goes into the field as typed.
    Literal(String),
    /// The field is derived and read-only.
    Ignore,
}

pub fn paste_single(text: &str, read_only: bool) -> SinglePaste {
    if read_only {
        return SinglePaste::Ignore;
    }
    match extract_single(text) {
        Some(value) => SinglePaste::Commit(value),
        None => SinglePaste::Literal(text.to_string()),
    }
}

fn captured<const N: usize>(re: &Regex, text: &str) -> Option<[f64; N]> {
    let caps = re.captures(text)?;
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = caps.get(i + 1)?.as_str().parse().ok()?;
    }
    Some(out)
}

fn all_numbers<const N: usize>(text: &str) -> Option<[f64; N]> {
    numbers(text)?.try_into().ok()
}

fn numbers(text: &str) -> Option<Vec<f64>> {
    ANY_NUMBER
        .find_iter(text)
        .map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}
