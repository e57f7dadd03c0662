//! # Color Sanitizer
//!
//! Every color string passes through [`sanitize`] before it reaches the
//! design model, on live edits and on load from storage alike.
//!
//! ## Rules
//!
//! 1. Color-function syntax the renderer cannot evaluate (`oklab()`,
//!    `oklch()`, `lab()`, `lch()`, `color()`) is stripped out.
//! 2. The remainder must be a 3/6-digit hex color, `rgb()`, `rgba()` or
//!    `hsl()`.
//! 3. Anything else collapses to [`FALLBACK_COLOR`].
//!
//! The function is pure and total, and `sanitize(sanitize(c)) == sanitize(c)`.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Value stored whenever a color fails validation
pub const FALLBACK_COLOR: &str = "#ffffff";

fn untrusted_functions() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(?:oklab|oklch|lab|lch|color)\([^)]*\)?").ok())
        .as_ref()
}

fn accepted_color() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:#(?:[0-9a-f]{3}|[0-9a-f]{6})|(?:rgba?|hsl)\((?:[-+0-9.,%\s/]|deg)+\))$",
        )
        .ok()
    })
    .as_ref()
}

/// Normalize an untrusted color string.
pub fn sanitize(input: &str) -> String {
    let (Some(strip), Some(accept)) = (untrusted_functions(), accepted_color()) else {
        return FALLBACK_COLOR.to_string();
    };

    let stripped = strip.replace_all(input, "");
    let candidate = stripped.trim();

    if accept.is_match(candidate) {
        candidate.to_string()
    } else {
        tracing::debug!(input, "color rejected, using fallback");
        FALLBACK_COLOR.to_string()
    }
}

/// Sanitize a raw JSON value; anything that is not a string is rejected.
pub fn sanitize_value(value: &Value) -> String {
    match value {
        Value::String(s) => sanitize(s),
        other => {
            tracing::debug!(?other, "non-string color, using fallback");
            FALLBACK_COLOR.to_string()
        }
    }
}

/// Sanitize an optional color, keeping `None` as "no color".
pub fn sanitize_opt(input: Option<&str>) -> Option<String> {
    input.map(sanitize)
}

/// Whether a string would survive sanitization unchanged
pub fn is_valid_color(input: &str) -> bool {
    sanitize(input) == input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors_pass_through() {
        assert_eq!(sanitize("#fff"), "#fff");
        assert_eq!(sanitize("#3366FF"), "#3366FF");
        assert_eq!(sanitize("  #abcdef  "), "#abcdef");
    }

    #[test]
    fn test_bad_hex_lengths_fall_back() {
        assert_eq!(sanitize("#ffff"), FALLBACK_COLOR);
        assert_eq!(sanitize("#12345g"), FALLBACK_COLOR);
        assert_eq!(sanitize("#"), FALLBACK_COLOR);
    }

    #[test]
    fn test_functional_colors() {
        assert_eq!(sanitize("rgb(255, 0, 0)"), "rgb(255, 0, 0)");
        assert_eq!(sanitize("rgba(0,0,0,0.5)"), "rgba(0,0,0,0.5)");
        assert_eq!(sanitize("hsl(120deg, 50%, 50%)"), "hsl(120deg, 50%, 50%)");
    }

    #[test]
    fn test_perceptual_spaces_are_stripped() {
        assert_eq!(sanitize("oklab(0.5 0.1 0.1)"), FALLBACK_COLOR);
        assert_eq!(sanitize("oklch(70% 0.1 200)"), FALLBACK_COLOR);
        assert_eq!(sanitize("lab(50% 40 59)"), FALLBACK_COLOR);
        assert_eq!(sanitize("color(display-p3 1 0 0)"), FALLBACK_COLOR);
    }

    #[test]
    fn test_strip_keeps_trusted_remainder() {
        assert_eq!(sanitize("#000 oklab(0.5 0.1 0.1)"), "#000");
    }

    #[test]
    fn test_named_and_garbage_fall_back() {
        assert_eq!(sanitize("red"), FALLBACK_COLOR);
        assert_eq!(sanitize(""), FALLBACK_COLOR);
        assert_eq!(sanitize("url(javascript:alert(1))"), FALLBACK_COLOR);
        assert_eq!(sanitize("rgb(var(--x))"), FALLBACK_COLOR);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "#fff",
            "rgb(1,2,3)",
            "oklab(0.1 0.2 0.3)",
            "nonsense",
            " #ABC ",
            "#000 lch(1 2 3)",
            "hsl(10, 20%, 30%)",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_non_string_values() {
        assert_eq!(sanitize_value(&serde_json::json!(42)), FALLBACK_COLOR);
        assert_eq!(sanitize_value(&Value::Null), FALLBACK_COLOR);
        assert_eq!(sanitize_value(&serde_json::json!("#123")), "#123");
    }

    #[test]
    fn test_is_valid_color() {
        assert!(is_valid_color("#ffffff"));
        assert!(!is_valid_color("blue"));
        assert!(!is_valid_color(" #fff"));
    }
}
