//! Small egui helpers shared by the viewport and the status line.

use eframe::egui;

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}

/// Scale a colour's alpha by `alpha` (0.0..=1.0).
pub fn fade(color: egui::Color32, alpha: f32) -> egui::Color32 {
    color.gamma_multiply(alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Blue Train", 20), "Blue Train");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_str("ジャズ喫茶のレコード", 6), "ジャズ...");
        assert_eq!(truncate_str("abcdefghij", 8), "abcde...");
    }

    #[test]
    fn fade_scales_towards_transparent() {
        let c = egui::Color32::from_rgb(200, 100, 50);
        assert_eq!(fade(c, 0.0).a(), 0);
        assert_eq!(fade(c, 0.5).a(), 128);
        assert_eq!(fade(c, 1.0), c);
        assert_eq!(fade(c, 3.0), c);
    }
}
