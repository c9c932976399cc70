use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use carousel::constants::*;
use carousel::counter::AnimatedCounter;
use carousel::details::DetailsView;
use carousel::project::{Deck, Project};
use carousel::typewriter::Typewriter;
use carousel::{CarouselError, SlideshowController, Subscription};
use raylib::prelude::*;

use super::card::Card;
use super::{draw_text_centered, wrap_text};
use crate::texture_loader::load_texture_with_exif_rotation;

const BACKGROUND: Color = Color { r: 17, g: 24, b: 39, a: 255 };
const ACCENT: Color = Color { r: 99, g: 102, b: 241, a: 255 };
const MUTED: Color = Color { r: 156, g: 163, b: 175, a: 255 };

const CHEVRON_RADIUS: f32 = 32.0;
const DOT_WIDTH: f32 = 64.0;
const DOT_GAP: f32 = 16.0;
const DOT_Y: f32 = 925.0;
const ONGOING_Y: f32 = 986.0;
const ONGOING_WIDTH: f32 = 420.0;
const ONGOING_GAP: f32 = 24.0;
// Longest frame fed to the timers, in slide periods
const MAX_CATCH_UP_PERIODS: u32 = 3;

fn carousel_area() -> Rectangle {
    Rectangle::new(360.0, 340.0, 1200.0, 560.0)
}

fn chevron_centers() -> (Vector2, Vector2) {
    let area = carousel_area();
    let y = area.y + area.height * 0.5;
    (
        Vector2::new(area.x + 48.0, y),
        Vector2::new(area.x + area.width - 48.0, y),
    )
}

fn dot_rect(index: usize, count: usize) -> Rectangle {
    let total = count as f32 * DOT_WIDTH + count.saturating_sub(1) as f32 * DOT_GAP;
    let x = RENDER_WIDTH as f32 * 0.5 - total * 0.5 + index as f32 * (DOT_WIDTH + DOT_GAP);
    Rectangle::new(x, DOT_Y, DOT_WIDTH, 10.0)
}

fn ongoing_rect(index: usize, count: usize) -> Rectangle {
    let total = count as f32 * ONGOING_WIDTH + count.saturating_sub(1) as f32 * ONGOING_GAP;
    let x = RENDER_WIDTH as f32 * 0.5 - total * 0.5 + index as f32 * (ONGOING_WIDTH + ONGOING_GAP);
    Rectangle::new(x, ONGOING_Y, ONGOING_WIDTH, 72.0)
}

fn details_panel() -> Rectangle {
    Rectangle::new(460.0, 140.0, 1000.0, 800.0)
}

fn close_button() -> Rectangle {
    let panel = details_panel();
    Rectangle::new(panel.x + panel.width - 64.0, panel.y + 20.0, 44.0, 44.0)
}

fn within_circle(point: Vector2, center: Vector2, radius: f32) -> bool {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    dx * dx + dy * dy <= radius * radius
}

/// What a key press or click asks the showcase to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    GoTo(usize),
    OpenActive,
    CloseDetails,
    Hover(bool),
}

/// Maps a click at `point` (framebuffer coordinates) to a command.
pub fn hit_test(point: Vector2, slide_count: usize, details_open: bool) -> Option<Command> {
    if details_open {
        let outside_panel = !details_panel().check_collision_point_rec(point);
        let on_close = close_button().check_collision_point_rec(point);
        return (outside_panel || on_close).then_some(Command::CloseDetails);
    }

    let (left, right) = chevron_centers();
    if within_circle(point, left, CHEVRON_RADIUS) {
        return Some(Command::Previous);
    }
    if within_circle(point, right, CHEVRON_RADIUS) {
        return Some(Command::Next);
    }

    for index in 0..slide_count {
        let dot = dot_rect(index, slide_count);
        // Dots are thin, accept clicks a little above and below
        let target = Rectangle::new(dot.x, dot.y - 10.0, dot.width, dot.height + 20.0);
        if target.check_collision_point_rec(point) {
            return Some(Command::GoTo(index));
        }
    }

    carousel_area()
        .check_collision_point_rec(point)
        .then_some(Command::OpenActive)
}

/// Everything the showcase window shows, minus the GPU resources.
pub struct Showcase {
    controller: SlideshowController<Project>,
    details: DetailsView,
    counters: Vec<(&'static str, AnimatedCounter)>,
    typewriter: Typewriter,
    // Compact (title, tags) cards for projects still in progress
    ongoing: Vec<(String, String)>,
    changes: Rc<RefCell<Vec<usize>>>,
    subscriptions: Vec<Subscription>,
    hovered: bool,
}

impl Showcase {
    pub fn new(deck: &Deck, period: Duration) -> carousel::error::Result<Self> {
        let mut controller = SlideshowController::create(deck.projects.clone(), period)?;

        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let mut subscriptions = vec![controller.on_change(move |index| sink.borrow_mut().push(index))?];
        let titles: Vec<String> = deck.projects.iter().map(|p| p.title.clone()).collect();
        subscriptions.push(controller.on_change(move |index| {
            tracing::info!(slide = index, title = %titles[index], "active project changed");
        })?);

        let counters = deck
            .stats()
            .cards()
            .into_iter()
            .map(|(name, value)| (name, AnimatedCounter::new(value, COUNTER_DURATION)))
            .collect();

        let ongoing = deck
            .ongoing()
            .map(|project| (project.title.clone(), project.tag_line()))
            .collect();

        Ok(Self {
            details: DetailsView::new(controller.len()),
            controller,
            counters,
            typewriter: Typewriter::with_taglines(),
            ongoing,
            changes,
            subscriptions,
            hovered: false,
        })
    }

    pub fn start(&mut self) -> carousel::error::Result<()> {
        for (_, counter) in self.counters.iter_mut() {
            counter.start();
        }
        self.controller.start()
    }

    pub fn controller(&self) -> &SlideshowController<Project> {
        &self.controller
    }

    pub fn details(&self) -> &DetailsView {
        &self.details
    }

    pub fn ongoing(&self) -> &[(String, String)] {
        &self.ongoing
    }

    pub fn apply(&mut self, command: Command) {
        let result = match command {
            Command::Next => self.controller.next(),
            Command::Previous => self.controller.previous(),
            Command::GoTo(index) => self.controller.go_to(index),
            Command::OpenActive => {
                let index = self.controller.current_index();
                self.details.open(index).and_then(|()| self.sync_pause())
            }
            Command::CloseDetails => {
                self.details.close();
                self.sync_pause()
            }
            Command::Hover(hovered) => {
                if hovered == self.hovered {
                    return;
                }
                self.hovered = hovered;
                self.sync_pause()
            }
        };

        match result {
            Ok(()) => {}
            // Misuse after teardown: log and keep rendering
            Err(CarouselError::Disposed) => tracing::warn!(?command, "ignored input after dispose"),
            Err(e) => tracing::error!(?command, "showcase command failed: {e}"),
        }
    }

    // Hovering the carousel or reading a project's details holds the slide
    fn sync_pause(&mut self) -> carousel::error::Result<()> {
        if self.hovered || self.details.is_open() {
            self.controller.pause()
        } else {
            self.controller.resume()
        }
    }

    /// Advances every timer. A stalled frame (window drag, resume from
    /// sleep) counts as at most a few slide periods.
    pub fn update(&mut self, dt: Duration) {
        let dt = dt.min(self.controller.period() * MAX_CATCH_UP_PERIODS);
        self.controller.update(dt);
        self.typewriter.update(dt);
        for (_, counter) in self.counters.iter_mut() {
            counter.update(dt);
        }
    }

    /// Active indices reported by the controller since the last call.
    pub fn take_changes(&self) -> Vec<usize> {
        std::mem::take(&mut *self.changes.borrow_mut())
    }

    pub fn dispose(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        if let Err(e) = self.controller.dispose() {
            tracing::warn!("showcase already disposed: {e}");
        }
    }
}

pub struct ShowcaseEngine {
    period: Duration,
    showcase: Option<Showcase>,
    cards: Vec<Card>,
    textures: Vec<Option<Texture2D>>,
    frame_time: f32,
}

impl ShowcaseEngine {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            showcase: None,
            cards: Vec::new(),
            textures: Vec::new(),
            frame_time: 0.0,
        }
    }

    fn draw(&self, d: &mut RaylibDrawHandle, showcase: &Showcase) {
        d.clear_background(BACKGROUND);
        let center_x = RENDER_WIDTH as f32 * 0.5;

        // Hero tagline with a blinking caret
        let caret = if (self.frame_time * 2.0) as u32 % 2 == 0 { "|" } else { " " };
        let tagline = format!("We {}{}", showcase.typewriter.displayed(), caret);
        draw_text_centered(d, &tagline, center_x, 40.0, 72, ACCENT);
        draw_text_centered(d, "Our Projects", center_x, 140.0, 52, Color::WHITE);

        // Stats row
        let card_w = 280.0;
        let gap = 24.0;
        let count = showcase.counters.len() as f32;
        let start_x = center_x - (count * card_w + (count - 1.0) * gap) * 0.5;
        for (i, (name, counter)) in showcase.counters.iter().enumerate() {
            let rect = Rectangle::new(start_x + i as f32 * (card_w + gap), 210.0, card_w, 104.0);
            d.draw_rectangle_rounded(rect, 0.2, 12, Color::new(31, 41, 55, 160));
            let cx = rect.x + rect.width * 0.5;
            draw_text_centered(d, &counter.label(), cx, rect.y + 16.0, 40, Color::WHITE);
            draw_text_centered(d, name, cx, rect.y + 66.0, 22, Color::new(209, 213, 219, 255));
        }

        // Carousel
        let controller = showcase.controller();
        let area = carousel_area();
        for (index, card) in self.cards.iter().enumerate() {
            let texture = self.textures.get(index).and_then(Option::as_ref);
            card.draw(d, area, &controller.slides()[index], texture);
        }

        let (left, right) = chevron_centers();
        for (center, label) in [(left, "<"), (right, ">")] {
            d.draw_circle_v(center, CHEVRON_RADIUS, Color::new(0, 0, 0, 128));
            draw_text_centered(d, label, center.x, center.y - 16.0, 32, Color::WHITE);
        }

        let active = controller.current_index();
        for index in 0..controller.len() {
            let color = if index == active { ACCENT } else { Color::new(255, 255, 255, 26) };
            d.draw_rectangle_rounded(dot_rect(index, controller.len()), 1.0, 8, color);
        }
        let caption = format!("Slide {} of {}", active + 1, controller.len());
        draw_text_centered(d, &caption, center_x, DOT_Y + 26.0, 22, MUTED);

        // Ongoing projects strip
        let ongoing = showcase.ongoing();
        for (index, (title, tags)) in ongoing.iter().enumerate() {
            let rect = ongoing_rect(index, ongoing.len());
            d.draw_rectangle_rounded(rect, 0.2, 8, Color::new(255, 255, 255, 8));
            let cx = rect.x + rect.width * 0.5;
            draw_text_centered(d, title, cx, rect.y + 10.0, 24, Color::WHITE);
            draw_text_centered(d, tags, cx, rect.y + 42.0, 18, Color::new(209, 213, 219, 255));
        }

        if let Some(selected) = showcase.details().selected() {
            let texture = self.textures.get(selected).and_then(Option::as_ref);
            draw_details(d, &controller.slides()[selected], texture);
        }
    }
}

fn draw_details(d: &mut RaylibDrawHandle, project: &Project, texture: Option<&Texture2D>) {
    d.draw_rectangle(0, 0, RENDER_WIDTH, RENDER_HEIGHT, Color::new(0, 0, 0, 165));

    let panel = details_panel();
    d.draw_rectangle_rounded(panel, 0.05, 12, Color::new(17, 24, 39, 242));

    let close = close_button();
    d.draw_rectangle_rounded(close, 0.3, 8, Color::new(255, 255, 255, 13));
    draw_text_centered(d, "X", close.x + close.width * 0.5, close.y + 10.0, 26, Color::WHITE);

    let image = Rectangle::new(panel.x + 60.0, panel.y + 84.0, panel.width - 120.0, 340.0);
    match texture {
        Some(texture) => d.draw_texture_pro(
            texture,
            Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
            image,
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        ),
        None => d.draw_rectangle_rounded(image, 0.04, 8, Color::new(67, 56, 202, 255)),
    }

    let center_x = panel.x + panel.width * 0.5;
    let mut y = image.y + image.height + 30.0;
    draw_text_centered(d, &project.title, center_x, y, 44, Color::WHITE);
    y += 64.0;
    for line in wrap_text(&project.description, 26, panel.width - 160.0) {
        draw_text_centered(d, &line, center_x, y, 26, Color::new(209, 213, 219, 255));
        y += 32.0;
    }
    y += 20.0;

    let chips = format!(
        "{}   {}   {}",
        project.tags.join("   "),
        project.year,
        project.status.label()
    );
    draw_text_centered(d, chips.trim_start(), center_x, y, 22, ACCENT);
}

impl crate::engine::Engine for ShowcaseEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, deck: &Deck) -> Result<()> {
        let mut showcase = Showcase::new(deck, self.period)?;

        for project in &deck.projects {
            let texture = deck.image_path(project).and_then(|path| {
                match load_texture_with_exif_rotation(rl, thread, &path) {
                    Ok(texture) => Some(texture),
                    Err(e) => {
                        tracing::warn!(project = %project.title, "Using placeholder image: {e:#}");
                        None
                    }
                }
            });
            self.textures.push(texture);
        }

        self.cards = (0..deck.projects.len()).map(|i| Card::new(i == 0)).collect();
        showcase.start()?;
        self.showcase = Some(showcase);
        Ok(())
    }

    fn handle_input(&mut self, rl: &RaylibHandle, scale: Vector2) {
        let Some(showcase) = self.showcase.as_mut() else {
            return;
        };

        let mut commands = Vec::new();
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            commands.push(Command::Next);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            commands.push(Command::Previous);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_ENTER) && !showcase.details().is_open() {
            commands.push(Command::OpenActive);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            commands.push(Command::CloseDetails);
        }

        let mouse = rl.get_mouse_position();
        let point = Vector2::new(mouse.x * scale.x, mouse.y * scale.y);
        commands.push(Command::Hover(carousel_area().check_collision_point_rec(point)));

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let len = showcase.controller().len();
            if let Some(command) = hit_test(point, len, showcase.details().is_open()) {
                commands.push(command);
            }
        }

        for command in commands {
            showcase.apply(command);
        }
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool {
        let Some(mut showcase) = self.showcase.take() else {
            return false;
        };
        self.frame_time += dt;

        showcase.update(Duration::from_secs_f32(dt));
        if !showcase.take_changes().is_empty() {
            let active = showcase.controller().current_index();
            for (index, card) in self.cards.iter_mut().enumerate() {
                card.set_active(index == active);
            }
        }
        for card in self.cards.iter_mut() {
            card.update(dt);
        }

        rl.draw_texture_mode(thread, framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            self.draw(&mut d, &showcase);
        });

        self.showcase = Some(showcase);
        true
    }

    fn shutdown(&mut self) {
        if let Some(showcase) = self.showcase.as_mut() {
            showcase.dispose();
        }
    }
}
