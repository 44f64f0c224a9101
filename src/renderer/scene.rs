//! Scene building: game state to 2D draw primitives
//!
//! Colors are chosen here from entity kind and state; the simulation never
//! deals in colors.

use glam::Vec2;

use crate::Settings;
use crate::consts::BULLET_RADIUS;
use crate::sim::{BulletOwner, EnemyKind, GameState};

/// RGBA color, channels in 0-255 and alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for Canvas2D fill/stroke styles
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
        /// Outline color and width
        stroke: Option<(Color, f32)>,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        fill: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        size_px: u32,
        align: TextAlign,
        fill: Color,
    },
}

/// A full frame's worth of draw commands, in paint order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Option<Color>,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    fn circle(&mut self, center: Vec2, radius: f32, fill: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke: None,
        });
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Color) {
        self.commands.push(DrawCommand::Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
            fill,
        });
    }

    fn text(&mut self, x: f32, y: f32, text: String, size_px: u32, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            pos: Vec2::new(x, y),
            text,
            size_px,
            align,
            fill: Color::WHITE,
        });
    }

    /// Background/fill bar pair
    #[allow(clippy::too_many_arguments)]
    fn bar(&mut self, x: f32, y: f32, w: f32, h: f32, fraction: f32, back: Color, front: Color) {
        self.rect(x, y, w, h, back);
        self.rect(x, y, w * fraction.clamp(0.0, 1.0), h, front);
    }
}

/// Enemy color by archetype
pub fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Basic => Color::GREEN,
        EnemyKind::Shooter => Color::PURPLE,
        EnemyKind::Tank => Color::ORANGE,
    }
}

/// `m:ss` countdown text
pub fn format_timer(remaining_secs: u64) -> String {
    format!("Time: {}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

/// Build the draw list for the current state
pub fn build_scene(state: &GameState, settings: &Settings, fps: Option<u32>) -> Scene {
    let arena = state.arena;
    let mut scene = Scene {
        width: arena.width,
        height: arena.height,
        background: settings.high_contrast.then_some(Color::BLACK),
        commands: Vec::with_capacity(
            8 + 2 * (state.bullets.len() + state.enemies.len() + state.orbs.len()),
        ),
    };

    if settings.show_hud {
        draw_hud(&mut scene, state, fps.filter(|_| settings.show_fps));
    }

    // Player
    let player = &state.player;
    let player_color = if player.is_invulnerable() {
        Color::BLUE.with_alpha(0.5)
    } else {
        Color::BLUE
    };
    scene.circle(player.pos, player.radius, player_color);
    if settings.show_health_bars {
        let fraction = player.display_health() as f32 / crate::consts::PLAYER_MAX_HEALTH as f32;
        scene.bar(
            player.pos.x - 25.0,
            player.pos.y - 40.0,
            50.0,
            5.0,
            fraction,
            Color::RED,
            Color::GREEN,
        );
    }

    for bullet in &state.bullets {
        let color = match bullet.owner {
            BulletOwner::Player => Color::RED,
            BulletOwner::Enemy => Color::YELLOW,
        };
        scene.circle(bullet.pos, BULLET_RADIUS, color);
    }

    for enemy in &state.enemies {
        scene.circle(enemy.pos, enemy.radius, enemy_color(enemy.kind));
        if settings.show_health_bars && enemy.max_health.is_some() {
            scene.bar(
                enemy.pos.x - 20.0,
                enemy.pos.y - 30.0,
                40.0,
                5.0,
                enemy.health_fraction(),
                Color::RED,
                Color::GREEN,
            );
        }
    }

    for orb in &state.orbs {
        scene.commands.push(DrawCommand::Circle {
            center: orb.pos,
            radius: orb.radius,
            fill: if orb.moving_to_player {
                Color::LIGHT_BLUE
            } else {
                Color::CYAN
            },
            stroke: Some((Color::WHITE, 2.0)),
        });
    }

    scene
}

fn draw_hud(scene: &mut Scene, state: &GameState, fps: Option<u32>) {
    let width = scene.width;
    let height = scene.height;
    let player = &state.player;

    scene.text(
        width / 2.0,
        30.0,
        format_timer(state.remaining_secs),
        24,
        TextAlign::Center,
    );
    scene.text(
        20.0,
        height - 40.0,
        format!("Level: {}", player.level),
        20,
        TextAlign::Left,
    );

    let fraction = player.experience as f32 / player.experience_to_next.max(1) as f32;
    scene.bar(20.0, height - 25.0, 300.0, 15.0, fraction, Color::GRAY, Color::GOLD);
    scene.text(
        170.0,
        height - 14.0,
        format!("{} / {} EXP", player.experience, player.experience_to_next),
        12,
        TextAlign::Center,
    );

    if let Some(fps) = fps {
        scene.text(width - 60.0, 30.0, format!("{} FPS", fps), 14, TextAlign::Left);
    }
}
