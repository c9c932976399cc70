use anyhow::Result;
use carousel::project::Deck;
use raylib::prelude::*;

pub trait Engine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, deck: &Deck) -> Result<()>;
    /// Maps keyboard and mouse events onto state changes. `scale` converts
    /// window coordinates into framebuffer coordinates.
    fn handle_input(&mut self, rl: &RaylibHandle, scale: Vector2);
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool;
    fn shutdown(&mut self);
}
