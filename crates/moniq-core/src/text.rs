//! Fitting label text into a fixed pixel width
//!
//! Labels that overflow are shortened by dropping trailing characters and
//! appending a `~` marker until the result fits. The outcome is the longest
//! prefix whose marked form fits, so the search can bisect instead of
//! re-measuring after every dropped character: widths only grow as a prefix
//! gets longer.

/// Marker appended to truncated text
pub const TRUNCATION_MARKER: char = '~';

/// Characters kept after the marker by [`fit_keeping_suffix`]
pub const KEPT_SUFFIX_CHARS: usize = 3;

/// Measures rendered text width in pixels
pub trait TextMeasure {
    fn width(&self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32,
{
    fn width(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Fit `text` into `max_width`, truncating with a trailing marker
///
/// Text that already fits is returned unchanged. If not even the bare
/// marker fits, the marker alone is returned.
pub fn fit_to_width(text: &str, max_width: f32, measure: &impl TextMeasure) -> String {
    if measure.width(text) <= max_width {
        return text.to_string();
    }

    let boundaries = char_boundaries(text);
    let keep = longest_fitting(boundaries.len().saturating_sub(2), |n| {
        measure.width(&marked(&text[..boundaries[n]], "")) <= max_width
    })
    .unwrap_or(0);
    marked(&text[..boundaries[keep]], "")
}

/// Fit `text` into `max_width`, keeping its last three characters
///
/// Used for file names so the extension stays readable:
/// `"LONG_WAVETABLE_NAME.wav"` becomes `"LONG_WAVE~wav"`.
pub fn fit_keeping_suffix(text: &str, max_width: f32, measure: &impl TextMeasure) -> String {
    if measure.width(text) <= max_width {
        return text.to_string();
    }

    let boundaries = char_boundaries(text);
    let char_count = boundaries.len() - 1;
    if char_count <= KEPT_SUFFIX_CHARS {
        return fit_to_width(text, max_width, measure);
    }

    let split = boundaries[char_count - KEPT_SUFFIX_CHARS];
    let (head, suffix) = text.split_at(split);
    let head_chars = char_count - KEPT_SUFFIX_CHARS;

    // The head loses at least one character once truncation starts
    match longest_fitting(head_chars.saturating_sub(1), |n| {
        measure.width(&marked(&head[..boundaries[n]], suffix)) <= max_width
    }) {
        Some(keep) => marked(&head[..boundaries[keep]], suffix),
        // Not even the marker and suffix fit
        None => fit_to_width(text, max_width, measure),
    }
}

/// Byte offsets of every char boundary, including the end of the string
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

fn marked(prefix: &str, suffix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + suffix.len() + 1);
    out.push_str(prefix);
    out.push(TRUNCATION_MARKER);
    out.push_str(suffix);
    out
}

/// Largest `n` in `0..=upper` with `fits(n)`
fn longest_fitting(upper: usize, fits: impl Fn(usize) -> bool) -> Option<usize> {
    let (mut lo, mut hi) = (0usize, upper);
    if !fits(lo) {
        return None;
    }
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Some(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10px per character
    fn mono(text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    /// Reference behaviour: drop one char at a time and re-measure
    fn fit_by_popping(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> String {
        if measure(text) <= max_width {
            return text.to_string();
        }
        let mut chars: Vec<char> = text.chars().collect();
        loop {
            chars.pop();
            let candidate: String = chars.iter().chain(std::iter::once(&'~')).collect();
            if measure(&candidate) <= max_width || chars.is_empty() {
                return candidate;
            }
        }
    }

    #[test]
    fn test_fitting_text_is_unchanged() {
        assert_eq!(fit_to_width("CUTOFF", 60.0, &mono), "CUTOFF");
        assert_eq!(fit_to_width("", 0.0, &mono), "");
    }

    #[test]
    fn test_overflow_ends_with_marker() {
        let fitted = fit_to_width("RESONANCE AMOUNT", 100.0, &mono);
        assert_eq!(fitted, "RESONANCE~");
        assert!(mono(&fitted) <= 100.0);
        let prefix = fitted.trim_end_matches(TRUNCATION_MARKER);
        assert!("RESONANCE AMOUNT".starts_with(prefix));
        assert!(prefix.len() < "RESONANCE AMOUNT".len());
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let once = fit_to_width("OSCILLATOR 1 FINE TUNE", 120.0, &mono);
        let twice = fit_to_width(&once, 120.0, &mono);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_matches_one_char_at_a_time() {
        // Proportional-ish metric: wide capitals, narrow everything else
        let proportional = |s: &str| {
            s.chars()
                .map(|c| if c.is_ascii_uppercase() { 14.0 } else { 7.0 })
                .sum::<f32>()
        };
        let inputs = ["Filter Envelope Attack", "LFO 2 RATE", "a", "WWWWWWWWWW", "Ünïcödé Nämé"];
        for input in inputs {
            for max in [0.0, 7.0, 20.0, 55.0, 90.0, 400.0] {
                assert_eq!(
                    fit_to_width(input, max, &proportional),
                    fit_by_popping(input, max, proportional),
                    "input {:?} width {}",
                    input,
                    max
                );
            }
        }
    }

    #[test]
    fn test_marker_alone_when_nothing_fits() {
        assert_eq!(fit_to_width("ABC", 5.0, &mono), "~");
    }

    #[test]
    fn test_keeping_suffix() {
        let fitted = fit_keeping_suffix("LONG_WAVETABLE_NAME.wav", 130.0, &mono);
        assert_eq!(fitted, "LONG_WAVE~wav");
        assert_eq!(fit_keeping_suffix("SAW.wav", 130.0, &mono), "SAW.wav");
        assert_eq!(fit_keeping_suffix(&fitted, 130.0, &mono), fitted);
    }

    #[test]
    fn test_keeping_suffix_short_text_falls_back() {
        assert_eq!(fit_keeping_suffix("ABCD", 30.0, &mono), "AB~");
        assert_eq!(fit_keeping_suffix("ABC", 20.0, &mono), "A~");
    }
}
