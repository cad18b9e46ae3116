//! Pure layout and pixel math for card rendering.
//!
//! Kept free of font and image types so it can be unit tested directly.

/// Greedy word wrap.
///
/// `measure` returns the pixel width of a string. Words are never split; a
/// single word wider than `max_width` gets a line of its own. Explicit
/// newlines always break.
pub fn wrap_words(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}

/// Signed distance from a pixel center to the edge of a `width`×`height`
/// rectangle with rounded corners. Negative inside.
pub fn rounded_rect_distance(x: u32, y: u32, width: u32, height: u32, radius: u32) -> f32 {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let radius = (radius as f32).min(half_w).min(half_h);

    let qx = (x as f32 + 0.5 - half_w).abs() - (half_w - radius);
    let qy = (y as f32 + 0.5 - half_h).abs() - (half_h - radius);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

/// Whether a pixel lies on the border stroke.
pub fn in_border(x: u32, y: u32, width: u32, height: u32, radius: u32, stroke: u32) -> bool {
    let distance = rounded_rect_distance(x, y, width, height, radius);
    distance <= 0.0 && distance >= -(stroke as f32)
}

/// Source-over blend of `src` onto `dst`, scaled by `coverage` (0..=1).
pub fn blend(dst: [u8; 4], src: [u8; 4], coverage: f32) -> [u8; 4] {
    let alpha = (f32::from(src[3]) / 255.0) * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return dst;
    }
    let mix = |s: u8, d: u8| (f32::from(s) * alpha + f32::from(d) * (1.0 - alpha)).round() as u8;
    let out_alpha = (alpha * 255.0 + f32::from(dst[3]) * (1.0 - alpha)).round() as u8;
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        out_alpha,
    ]
}
