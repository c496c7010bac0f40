//! CSS color validation for band colors.
//!
//! A browser canvas throws when a gradient stop is given a color it cannot
//! parse. Headless surfaces use [`is_valid_css_color`] to reproduce that
//! behavior so the gradient fallback path is the same everywhere.

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// Chart.js falls back to this when a dataset declares no color.
pub const CHART_DEFAULT_COLOR: &str = "rgba(0, 0, 0, 0.1)";

/// CSS named colors (level 4), lowercase.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

/// Check whether a canvas would accept `s` as a fill or stroke color.
///
/// Supports formats:
/// - "#RGB", "#RGBA", "#RRGGBB", "#RRGGBBAA"
/// - "rgb(r, g, b)" and "rgba(r, g, b, a)"
/// - "hsl(h, s%, l%)" and "hsla(h, s%, l%, a)"
/// - named colors, "transparent" and "currentcolor"
pub fn is_valid_css_color(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    let lower = s.to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix('#') {
        return is_hex_color(hex);
    }
    if let Some(args) = function_args(&lower, "rgba").or_else(|| function_args(&lower, "rgb")) {
        return is_rgb_args(args);
    }
    if let Some(args) = function_args(&lower, "hsla").or_else(|| function_args(&lower, "hsl")) {
        return is_hsl_args(args);
    }
    lower == "transparent" || lower == "currentcolor" || NAMED_COLORS.contains(&lower.as_str())
}

fn is_hex_color(hex: &str) -> bool {
    matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Strip `name(` ... `)` and return the inner argument list.
fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Split on commas, or on whitespace with an optional `/ alpha` tail.
fn split_args(args: &str) -> Vec<&str> {
    if args.contains(',') {
        args.split(',').map(str::trim).collect()
    } else {
        args.split(|c: char| c.is_whitespace() || c == '/')
            .filter(|p| !p.is_empty())
            .collect()
    }
}

fn parse_number(part: &str) -> Option<f64> {
    let value: f64 = part.parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_percent(part: &str) -> Option<f64> {
    parse_number(part.strip_suffix('%')?)
}

fn is_alpha(part: &str) -> bool {
    parse_percent(part)
        .or_else(|| parse_number(part))
        .is_some()
}

fn is_rgb_args(args: &str) -> bool {
    let parts = split_args(args);
    if !(3..=4).contains(&parts.len()) {
        return false;
    }
    let mut iter = parts.iter();
    let channels_ok = iter
        .by_ref()
        .take(3)
        .all(|p| parse_percent(p).or_else(|| parse_number(p)).is_some());
    channels_ok && iter.all(|p| is_alpha(p))
}

fn is_hsl_args(args: &str) -> bool {
    let parts = split_args(args);
    if !(3..=4).contains(&parts.len()) {
        return false;
    }
    let mut iter = parts.iter();
    let hue_ok = iter.next().is_some_and(|h| {
        let h: &str = h;
        parse_number(h.strip_suffix("deg").unwrap_or(h)).is_some()
    });
    let sl_ok = iter.by_ref().take(2).all(|p| parse_percent(p).is_some());
    hue_ok && sl_ok && iter.all(|p| is_alpha(p))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert!(is_valid_css_color("#F00"));
        assert!(is_valid_css_color("#F00A"));
        assert!(is_valid_css_color("#FF0000"));
        assert!(is_valid_css_color("#ff000080"));
        assert!(!is_valid_css_color("#FF00"));
        assert!(!is_valid_css_color("#GG0000"));
    }

    #[test]
    fn test_rgb_and_rgba() {
        assert!(is_valid_css_color("rgb(255, 128, 64)"));
        assert!(is_valid_css_color("rgba(0, 255, 0, 1.000)"));
        assert!(is_valid_css_color("rgba(0,0,0,0.1)"));
        assert!(is_valid_css_color("rgb(0 255 0 / 50%)"));
        assert!(!is_valid_css_color("rgba(0, 255)"));
        assert!(!is_valid_css_color("rgba(0, 255, 0, 1"));
        assert!(!is_valid_css_color("rgba(zero, 255, 0, 1)"));
    }

    #[test]
    fn test_hsl() {
        assert!(is_valid_css_color("hsl(120, 100%, 50%)"));
        assert!(is_valid_css_color("hsla(120deg, 100%, 50%, 0.3)"));
        assert!(!is_valid_css_color("hsl(120, 100, 50)"));
    }

    #[test]
    fn test_named_and_keywords() {
        assert!(is_valid_css_color("red"));
        assert!(is_valid_css_color("RebeccaPurple"));
        assert!(is_valid_css_color("transparent"));
        assert!(!is_valid_css_color("not-a-colour"));
        assert!(!is_valid_css_color(""));
        assert!(!is_valid_css_color("   "));
    }
}
