//! WCAG contrast arithmetic.
//!
//! Pure numeric functions with no document access. Ratio thresholds follow
//! WCAG AA: 4.5:1 for normal text, 3:1 for large text.
//! <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>

use lumen_core::config::ContrastConfig;
use lumen_core::types::AuditError;

/// Parse a hex color (`#rrggbb` or `#rgb`) into (r, g, b) components.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), AuditError> {
    let invalid = || AuditError::InvalidColorFormat(hex.to_string());
    let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
    match digits.len() {
        3 => {
            let r = u8::from_str_radix(&digits[0..1].repeat(2), 16).map_err(|_| invalid())?;
            let g = u8::from_str_radix(&digits[1..2].repeat(2), 16).map_err(|_| invalid())?;
            let b = u8::from_str_radix(&digits[2..3].repeat(2), 16).map_err(|_| invalid())?;
            Ok((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid())?;
            let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid())?;
            let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid())?;
            Ok((r, g, b))
        }
        _ => Err(invalid()),
    }
}

/// Relative luminance of an sRGB color, per the WCAG piecewise transform.
pub fn relative_luminance(rgb: (u8, u8, u8)) -> f64 {
    let srgb = [rgb.0, rgb.1, rgb.2].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * srgb[0] + 0.7152 * srgb[1] + 0.0722 * srgb[2]
}

/// Contrast ratio between two colors. Symmetric, always >= 1.0.
pub fn contrast_ratio(c1: (u8, u8, u8), c2: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(c1);
    let l2 = relative_luminance(c2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Large text per WCAG: at least 18px, or at least 14px and bold.
pub fn is_large_text(font_size_px: f64, is_bold: bool) -> bool {
    font_size_px >= 18.0 || (font_size_px >= 14.0 && is_bold)
}

/// Required AA ratio for text of the given size class.
pub fn required_ratio(large_text: bool, config: &ContrastConfig) -> f64 {
    if large_text {
        config.large_ratio
    } else {
        config.normal_ratio
    }
}
