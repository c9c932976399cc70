use carousel::constants::*;
use carousel::project::Project;
use raylib::prelude::*;

use super::{draw_text_centered, fade, text_width, wrap_text};

pub const IMAGE_HEIGHT: f32 = 300.0;
const HIDDEN_SCALE: f32 = 0.98;
const HIDDEN_OFFSET: f32 = 20.0;

/// One project card in the carousel. Fades, scales and slides into place
/// while it is the active slide, and back out when it is not.
pub struct Card {
    opacity: f32,
    scale: f32,
    offset_y: f32,

    start_opacity: f32,
    start_scale: f32,
    start_offset_y: f32,

    end_opacity: f32,
    end_scale: f32,
    end_offset_y: f32,

    animation_timer: f32,
    is_animating: bool,
}

impl Card {
    pub fn new(active: bool) -> Self {
        let (opacity, scale, offset_y) = Self::target(active);
        Self {
            opacity,
            scale,
            offset_y,
            start_opacity: opacity,
            start_scale: scale,
            start_offset_y: offset_y,
            end_opacity: opacity,
            end_scale: scale,
            end_offset_y: offset_y,
            animation_timer: 0.0,
            is_animating: false,
        }
    }

    fn target(active: bool) -> (f32, f32, f32) {
        if active {
            (1.0, 1.0, 0.0)
        } else {
            (0.0, HIDDEN_SCALE, HIDDEN_OFFSET)
        }
    }

    /// Starts animating from wherever the card currently is.
    pub fn set_active(&mut self, active: bool) {
        let (opacity, scale, offset_y) = Self::target(active);
        if (opacity, scale, offset_y) == (self.end_opacity, self.end_scale, self.end_offset_y) {
            return;
        }
        self.start_opacity = self.opacity;
        self.start_scale = self.scale;
        self.start_offset_y = self.offset_y;
        self.end_opacity = opacity;
        self.end_scale = scale;
        self.end_offset_y = offset_y;
        self.animation_timer = 0.0;
        self.is_animating = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }
        self.animation_timer += dt;
        let t = (self.animation_timer / CARD_TRANSITION).min(1.0);

        self.opacity = raylib::core::math::lerp(self.start_opacity, self.end_opacity, t);
        self.scale = raylib::core::math::lerp(self.start_scale, self.end_scale, t);
        self.offset_y = raylib::core::math::lerp(self.start_offset_y, self.end_offset_y, t);

        if self.animation_timer >= CARD_TRANSITION {
            self.is_animating = false;
            self.opacity = self.end_opacity;
            self.scale = self.end_scale;
            self.offset_y = self.end_offset_y;
        }
    }

    /// Screen rectangle of the card inside `area` at its current scale and offset.
    pub fn bounds(&self, area: Rectangle) -> Rectangle {
        let width = area.width * self.scale;
        let height = area.height * self.scale;
        Rectangle::new(
            area.x + (area.width - width) * 0.5,
            area.y + (area.height - height) * 0.5 + self.offset_y,
            width,
            height,
        )
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, area: Rectangle, project: &Project, texture: Option<&Texture2D>) {
        if self.opacity <= 0.01 {
            return;
        }
        let alpha = self.opacity;
        let rect = self.bounds(area);

        d.draw_rectangle_rounded(rect, 0.06, 12, fade(Color::new(31, 41, 55, 235), alpha));
        // left accent
        d.draw_rectangle_rec(
            Rectangle::new(rect.x, rect.y + 12.0, 6.0, rect.height - 24.0),
            fade(Color::new(99, 102, 241, 255), alpha),
        );

        let image_rect = Rectangle::new(rect.x + 32.0, rect.y + 28.0, rect.width - 64.0, IMAGE_HEIGHT * self.scale);
        match texture {
            Some(texture) => {
                // Cover: crop the texture to the image area's aspect ratio
                let tex_w = texture.width() as f32;
                let tex_h = texture.height() as f32;
                let target_ratio = image_rect.width / image_rect.height;
                let (src_w, src_h) = if tex_w / tex_h > target_ratio {
                    (tex_h * target_ratio, tex_h)
                } else {
                    (tex_w, tex_w / target_ratio)
                };
                d.draw_texture_pro(
                    texture,
                    Rectangle::new((tex_w - src_w) * 0.5, (tex_h - src_h) * 0.5, src_w, src_h),
                    image_rect,
                    Vector2::new(0.0, 0.0),
                    0.0,
                    fade(Color::WHITE, alpha),
                );
            }
            None => {
                d.draw_rectangle_rounded(image_rect, 0.04, 8, fade(Color::new(67, 56, 202, 255), alpha));
                draw_text_centered(
                    d,
                    &project.title,
                    image_rect.x + image_rect.width * 0.5,
                    image_rect.y + image_rect.height * 0.5 - 18.0,
                    36,
                    fade(Color::new(224, 231, 255, 255), alpha),
                );
            }
        }

        // year badge
        let year = project.year.to_string();
        let badge_w = (text_width(&year, 22) + 28) as f32;
        let badge = Rectangle::new(
            image_rect.x + (image_rect.width - badge_w) * 0.5,
            image_rect.y + image_rect.height - 44.0,
            badge_w,
            32.0,
        );
        d.draw_rectangle_rounded(badge, 1.0, 12, fade(Color::new(99, 102, 241, 230), alpha));
        draw_text_centered(d, &year, badge.x + badge.width * 0.5, badge.y + 5.0, 22, fade(Color::WHITE, alpha));

        let center_x = rect.x + rect.width * 0.5;
        let mut y = image_rect.y + image_rect.height + 24.0;
        draw_text_centered(d, &project.title, center_x, y, 44, fade(Color::WHITE, alpha));
        y += 60.0;

        for line in wrap_text(&project.description, 26, rect.width - 160.0) {
            draw_text_centered(d, &line, center_x, y, 26, fade(Color::new(209, 213, 219, 255), alpha));
            y += 32.0;
        }
        y += 10.0;

        if !project.tags.is_empty() {
            draw_text_centered(d, &project.tags.join("   "), center_x, y, 22, fade(Color::new(229, 231, 235, 255), alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_animates_to_full_opacity() {
        let mut card = Card::new(false);
        card.set_active(true);
        assert!(card.is_animating);

        card.update(CARD_TRANSITION / 2.0);
        assert!(card.opacity > 0.0 && card.opacity < 1.0);

        card.update(CARD_TRANSITION);
        assert!(!card.is_animating);
        assert_eq!((card.opacity, card.scale, card.offset_y), (1.0, 1.0, 0.0));
    }

    #[test]
    fn deactivating_mid_animation_starts_from_current_values() {
        let mut card = Card::new(false);
        card.set_active(true);
        card.update(CARD_TRANSITION / 2.0);
        let halfway = card.opacity;

        card.set_active(false);
        assert_eq!(card.start_opacity, halfway);
        card.update(CARD_TRANSITION);
        assert_eq!(card.opacity, 0.0);
    }

    #[test]
    fn repeated_activation_does_not_restart() {
        let mut card = Card::new(true);
        card.set_active(true);
        assert!(!card.is_animating);
    }

    #[test]
    fn bounds_follow_scale_and_offset() {
        let card = Card::new(false);
        let bounds = card.bounds(Rectangle::new(0.0, 0.0, 100.0, 50.0));
        assert!((bounds.width - 98.0).abs() < 1e-3);
        assert!((bounds.y - (0.5 + HIDDEN_OFFSET)).abs() < 1e-3);
    }
}
