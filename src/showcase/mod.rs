pub mod card;
pub mod engine;

use raylib::prelude::*;

pub fn fade(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

/// Width in pixels of `text` in the default font.
pub fn text_width(text: &str, font_size: i32) -> i32 {
    measure_text(text, font_size)
}

pub fn draw_text_centered(d: &mut RaylibDrawHandle, text: &str, center_x: f32, y: f32, font_size: i32, color: Color) {
    let x = center_x as i32 - text_width(text, font_size) / 2;
    d.draw_text(text, x, y as i32, font_size, color);
}

pub fn wrap_text(text: &str, font_size: i32, max_width: f32) -> Vec<String> {
    wrap_with(text, max_width, |line| text_width(line, font_size) as f32)
}

// Greedy word wrap; a single word wider than the line gets a line of its own
fn wrap_with(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
