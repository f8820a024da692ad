//! Text measurement and truncation utilities.

/// Hangul, CJK and fullwidth forms take about a full em.
fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA960..=0xA97F
        | 0xAC00..=0xD7AF
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD)
}

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    let ems: f32 = text.chars().map(|c| if is_wide(c) { 1.0 } else { 0.60 }).sum();
    (ems * font_px as f32).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let next = format!("{out}{ch}");
        if estimate_text_width_px(&next, font_px) > max_px {
            if !out.is_empty() {
                if estimate_text_width_px(&(out.clone() + "…"), font_px) <= max_px {
                    out.push('…');
                } else if out.len() > 1 {
                    out.pop();
                    out.push('…');
                }
            }
            return out;
        }
        out = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_get_an_ellipsis() {
        assert_eq!(truncate_to_width("Short", 12, 200), "Short");
        let t = truncate_to_width("A very long category label", 12, 60);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 12) <= 60);
    }

    #[test]
    fn hangul_counts_as_full_width() {
        assert_eq!(estimate_text_width_px("매출", 12), 24);
        assert!(estimate_text_width_px("불량 유형", 12) > estimate_text_width_px("abcde", 12));

        let t = truncate_to_width("제품별 월간 매출 합계", 12, 60);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 12) <= 60);
    }
}
