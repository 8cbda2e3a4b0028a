use eframe::egui::Color32;

pub const BOARD_BACKGROUND: Color32 = Color32::from_rgb(24, 26, 48);
pub const BOARD_CHECKER: Color32 = Color32::from_rgb(30, 33, 58);
pub const SNAKE_HEAD: Color32 = Color32::from_rgb(74, 222, 128);
pub const SNAKE_BODY: Color32 = Color32::from_rgb(34, 197, 94);
pub const SNAKE_TAIL: Color32 = Color32::from_rgb(21, 128, 61);
pub const FOOD: Color32 = Color32::from_rgb(239, 68, 68);
pub const OVERLAY: Color32 = Color32::from_black_alpha(170);
pub const GAME_OVER_OVERLAY: Color32 = Color32::from_rgba_premultiplied(90, 10, 10, 200);
pub const HIGHLIGHT: Color32 = Color32::from_rgb(250, 204, 21);

/// Body color fading from head to tail. `index` 0 is the head.
pub fn segment_color(index: usize, length: usize) -> Color32 {
    if index == 0 {
        return SNAKE_HEAD;
    }
    let t = if length <= 2 {
        0.0
    } else {
        (index - 1) as f32 / (length - 2) as f32
    };
    lerp(SNAKE_BODY, SNAKE_TAIL, t)
}

fn lerp(from: Color32, to: Color32, t: f32) -> Color32 {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgb(mix(from.r(), to.r()), mix(from.g(), to.g()), mix(from.b(), to.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_color_endpoints() {
        assert_eq!(segment_color(0, 5), SNAKE_HEAD);
        assert_eq!(segment_color(1, 5), SNAKE_BODY);
        assert_eq!(segment_color(4, 5), SNAKE_TAIL);
        assert_eq!(segment_color(1, 2), SNAKE_BODY);
    }
}
