//! Draw command generation
//!
//! The host owns the actual 2D surface. We only describe what to paint,
//! as an ordered list of commands read from the current world.

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_COLOR, BALL_RADIUS};
use crate::sim::World;

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgba(BALL_COLOR)
    }
}

/// A single host drawing call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Color for every following circle
    SetColor(Color),
    DrawCircle { x: f64, y: f64, radius: f64 },
}

/// Drawing capabilities provided by the host
///
/// Calls are fire-and-forget: no results, no failure reporting.
pub trait Surface {
    fn set_color(&mut self, color: Color);
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64);
}

/// Commands for the current world using the default ball color
pub fn draw(world: &World) -> Vec<DrawCommand> {
    draw_with_color(world, Color::default())
}

/// One color change, then one circle per body in world order
pub fn draw_with_color(world: &World, color: Color) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(world.len() + 1);
    commands.push(DrawCommand::SetColor(color));
    commands.extend(world.bodies().iter().map(|body| DrawCommand::DrawCircle {
        x: body.pos.x,
        y: body.pos.y,
        radius: BALL_RADIUS,
    }));
    commands
}

/// Forward commands to the host surface, in order
pub fn render(commands: &[DrawCommand], surface: &mut dyn Surface) {
    for command in commands {
        match *command {
            DrawCommand::SetColor(color) => surface.set_color(color),
            DrawCommand::DrawCircle { x, y, radius } => surface.draw_circle(x, y, radius),
        }
    }
}

/// Surface that just keeps what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Circles drawn since the last clear
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawCircle { .. }))
            .count()
    }
}

impl Surface for CommandRecorder {
    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.commands.push(DrawCommand::DrawCircle { x, y, radius });
    }
}
