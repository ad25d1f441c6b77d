use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Copper pipe diameters the survey vocabulary allows, smallest first.
pub const ALLOWED_PIPE_SIZES_MM: [u32; 6] = [8, 10, 15, 22, 28, 35];

static MILLIMETRE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2}(?:\.\d+)?)\s*mm\b").unwrap());

/// Nearest allowed size. On an exact tie the first listed (smaller) size wins.
pub fn nearest_pipe_size(value: f64) -> u32 {
    let mut closest = ALLOWED_PIPE_SIZES_MM[0];
    let mut min_diff = (value - f64::from(closest)).abs();

    for allowed in ALLOWED_PIPE_SIZES_MM {
        let diff = (value - f64::from(allowed)).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = allowed;
        }
    }

    closest
}

/// Rewrites every `<number>mm` token to the nearest allowed pipe size.
///
/// Applies to any millimetre figure in the text, not only ones that read as
/// pipe diameters.
pub fn enforce_pipework_sizes(text: &str) -> String {
    MILLIMETRE_TOKEN
        .replace_all(text, |caps: &Captures<'_>| match caps[1].parse::<f64>() {
            Ok(value) => format!("{}mm", nearest_pipe_size(value)),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}
