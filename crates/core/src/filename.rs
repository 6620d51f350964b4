//! Download file names derived from the modified axes.

use crate::{AxisTag, AxisValues, FontConfig};

/// Fixed abbreviations for well-known axes. Other axes use the lowercased tag.
const SHORT_NAMES: &[(&str, &str)] = &[
    ("wght", "wt"),
    ("wdth", "w"),
    ("opsz", "o"),
    ("GRAD", "g"),
    ("slnt", "s"),
    ("XOPQ", "xo"),
    ("YOPQ", "yo"),
    ("XTRA", "xt"),
    ("YTUC", "yuc"),
    ("YTLC", "ylc"),
    ("YTAS", "yas"),
    ("YTDE", "yde"),
    ("YTFI", "yfi"),
];

/// Suffix used when every axis sits at its default.
pub const UNMODIFIED_SUFFIX: &str = "Custom";

pub fn short_name(tag: AxisTag) -> String {
    let tag = tag.to_string();
    SHORT_NAMES
        .iter()
        .find(|(full, _)| *full == tag)
        .map(|(_, short)| short.to_string())
        .unwrap_or_else(|| tag.to_lowercase())
}

/// `<base>-<parts>.ttf` where each part is `<shortcode><rounded value>` for an
/// axis that differs from the font's default.
///
/// CSS-only parameters never take part.
pub fn generate(font: &FontConfig, axes: &AxisValues) -> String {
    let parts: Vec<String> = font
        .axes
        .iter()
        .filter_map(|(tag, range)| {
            let value = *axes.get(tag)?;
            (value != range.default).then(|| format!("{}{}", short_name(*tag), round_half_up(value)))
        })
        .collect();

    if parts.is_empty() {
        format!("{}-{UNMODIFIED_SUFFIX}.ttf", font.base_name)
    } else {
        format!("{}-{}.ttf", font.base_name, parts.join("-"))
    }
}

/// The WOFF2 name for a generated TTF name.
pub fn woff2(ttf_name: &str) -> String {
    ttf_name.replacen(".ttf", ".woff2", 1)
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn font(id: &str) -> FontConfig {
        Catalog::builtin().get(id).unwrap().clone()
    }

    #[test]
    fn defaults_yield_custom() {
        let font = font("roboto-flex");
        assert_eq!(generate(&font, &font.default_axis_values()), "RobotoFlex-Custom.ttf");
    }

    #[test]
    fn modified_weight() {
        let font = font("roboto-flex");
        let mut axes = font.default_axis_values();
        axes.insert(AxisTag::new(b"wght"), 700.0);
        assert_eq!(generate(&font, &axes), "RobotoFlex-wt700.ttf");
    }

    #[test]
    fn multiple_axes_in_table_order() {
        let font = font("roboto-flex");
        let mut axes = font.default_axis_values();
        axes.insert(AxisTag::new(b"YTDE"), -250.4);
        axes.insert(AxisTag::new(b"wdth"), 75.5);
        axes.insert(AxisTag::new(b"opsz"), 40.0);
        assert_eq!(generate(&font, &axes), "RobotoFlex-o40-w76-yde-250.ttf");
    }

    #[test]
    fn rounds_half_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn unknown_axes_use_lowercased_tag() {
        let font = font("recursive");
        let mut axes = font.default_axis_values();
        axes.insert(AxisTag::new(b"CASL"), 1.0);
        axes.insert(AxisTag::new(b"wght"), 800.0);
        assert_eq!(generate(&font, &axes), "Recursive-casl1-wt800.ttf");
    }

    #[test]
    fn ignores_axes_outside_font() {
        let font = font("recursive");
        let mut axes = font.default_axis_values();
        axes.insert(AxisTag::new(b"opsz"), 90.0);
        assert_eq!(generate(&font, &axes), "Recursive-Custom.ttf");
    }

    #[test]
    fn is_idempotent() {
        let font = font("roboto-flex");
        let mut axes = font.default_axis_values();
        axes.insert(AxisTag::new(b"GRAD"), -50.0);
        assert_eq!(generate(&font, &axes), generate(&font, &axes));
    }

    #[test]
    fn woff2_swaps_extension() {
        assert_eq!(woff2("RobotoFlex-wt700.ttf"), "RobotoFlex-wt700.woff2");
    }
}
