//! Cosmetic line-clear effects: particles, confetti and a transient message.
//!
//! Positions are in board cells (x right, y down, fractional). Rates are
//! expressed per 16ms frame and scaled by the real elapsed time.

use crate::core::{LockEvent, SimpleRng};
use crate::fb::Rgb;
use crate::palette::{piece_color, CONFETTI_COLORS};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Reference frame length for all per-frame rates.
const FRAME_MS: f32 = 16.0;

const PARTICLES_PER_CELL: usize = 3;
const PARTICLE_SPEED: f32 = 1.0 / 6.0;
const PARTICLE_DECAY: f32 = 0.02;

const CONFETTI_PER_ROW: usize = 24;
const CONFETTI_DECAY: f32 = 0.008;
const CONFETTI_GRAVITY: f32 = 1.0 / 60.0;

/// How long the clear message stays up.
pub const MESSAGE_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confetti {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees
    pub angle: f32,
    pub velocity: f32,
    /// Degrees per frame
    pub spin: f32,
    pub color: Rgb,
    pub life: f32,
    pub sparkle: bool,
    pub sparkle_speed: f32,
}

impl Confetti {
    /// Visible strength in [0, 1]; sparkling pieces flicker.
    pub fn opacity(&self, clock_ms: f32) -> f32 {
        if self.sparkle {
            (clock_ms * self.sparkle_speed).sin().abs()
        } else {
            self.life.max(0.0)
        }
    }
}

/// Transient centred banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: &'static str,
    pub remaining_ms: u32,
}

impl Message {
    /// Fade in over the first tenth, hold, fade out over the last tenth.
    pub fn opacity(&self) -> f32 {
        let total = MESSAGE_MS as f32;
        let elapsed = total - self.remaining_ms as f32;
        let edge = total / 10.0;
        if elapsed < edge {
            elapsed / edge
        } else if (self.remaining_ms as f32) < edge {
            self.remaining_ms as f32 / edge
        } else {
            1.0
        }
    }
}

/// Active cosmetic effects.
#[derive(Debug, Clone)]
pub struct Effects {
    enabled: bool,
    rng: SimpleRng,
    clock_ms: f32,
    particles: Vec<Particle>,
    confetti: Vec<Confetti>,
    message: Option<Message>,
}

impl Effects {
    pub fn new(seed: u32, enabled: bool) -> Self {
        Self {
            enabled,
            rng: SimpleRng::new(seed),
            clock_ms: 0.0,
            particles: Vec::new(),
            confetti: Vec::new(),
            message: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn confetti(&self) -> &[Confetti] {
        &self.confetti
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn clock_ms(&self) -> f32 {
        self.clock_ms
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty() && self.confetti.is_empty() && self.message.is_none()
    }

    /// Drop everything (new game).
    pub fn clear(&mut self) {
        self.particles.clear();
        self.confetti.clear();
        self.message = None;
    }

    /// React to a freeze event from the engine.
    pub fn on_lock(&mut self, event: &LockEvent) {
        if event.rows.is_empty() {
            return;
        }

        self.message = Some(Message {
            text: clear_message(event.lines_cleared()),
            remaining_ms: MESSAGE_MS,
        });

        if !self.enabled {
            return;
        }
        for row in &event.rows {
            self.burst_row(row.y, &row.cells);
            self.burst_confetti();
        }
    }

    fn burst_row(&mut self, y: u8, cells: &[crate::types::Cell]) {
        for (x, cell) in cells.iter().enumerate() {
            let Some(kind) = cell else {
                continue;
            };
            for _ in 0..PARTICLES_PER_CELL {
                self.particles.push(Particle {
                    x: x as f32 + 0.5,
                    y: y as f32 + 0.5,
                    vx: self.rng.next_f32_range(-PARTICLE_SPEED, PARTICLE_SPEED),
                    vy: self.rng.next_f32_range(-PARTICLE_SPEED, PARTICLE_SPEED),
                    life: 1.0,
                    color: piece_color(*kind),
                });
            }
        }
    }

    fn burst_confetti(&mut self) {
        let cx = BOARD_WIDTH as f32 / 2.0;
        let cy = BOARD_HEIGHT as f32 / 2.0;
        for _ in 0..CONFETTI_PER_ROW {
            let color = CONFETTI_COLORS[self.rng.next_range(CONFETTI_COLORS.len() as u32) as usize];
            self.confetti.push(Confetti {
                x: cx,
                y: cy,
                angle: self.rng.next_f32_range(0.0, 360.0),
                velocity: self.rng.next_f32_range(0.1, 0.37),
                spin: self.rng.next_f32_range(-7.5, 7.5),
                color,
                life: 1.0,
                sparkle: self.rng.next_f32() > 0.5,
                sparkle_speed: self.rng.next_f32_range(0.05, 0.15) / FRAME_MS,
            });
        }
    }

    /// Advance every effect by `elapsed_ms` and drop the expired ones.
    pub fn update(&mut self, elapsed_ms: u32) {
        self.clock_ms += elapsed_ms as f32;
        let frames = elapsed_ms as f32 / FRAME_MS;

        for p in &mut self.particles {
            p.x += p.vx * frames;
            p.y += p.vy * frames;
            p.life -= PARTICLE_DECAY * frames;
        }
        self.particles.retain(|p| p.life > 0.0);

        for c in &mut self.confetti {
            let rad = c.angle.to_radians();
            c.x += rad.cos() * c.velocity * frames;
            c.y += (rad.sin() * c.velocity + CONFETTI_GRAVITY) * frames;
            c.angle += c.spin * frames;
            c.life -= CONFETTI_DECAY * frames;
        }
        self.confetti.retain(|c| c.life > 0.0);

        if let Some(msg) = self.message.as_mut() {
            msg.remaining_ms = msg.remaining_ms.saturating_sub(elapsed_ms);
            if msg.remaining_ms == 0 {
                self.message = None;
            }
        }
    }
}

fn clear_message(lines: usize) -> &'static str {
    match lines {
        1 => "LINE CLEAR",
        2 => "DOUBLE",
        3 => "TRIPLE",
        _ => "TETRIS!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameState, Tetromino};
    use crate::types::PieceKind;

    fn clear_event(rows: usize) -> LockEvent {
        let mut board = Board::new();
        for y in (20 - rows as i8)..20 {
            for x in 1..10 {
                board.set(x, y, Some(PieceKind::T));
            }
        }
        let mut piece = Tetromino::new(PieceKind::I);
        piece.shape = piece.shape.rotated_cw();
        piece.x = 0;
        piece.y = 16;
        let mut state = GameState::from_position(1, board, piece);
        state.freeze();
        state.take_last_event().unwrap()
    }

    #[test]
    fn clear_spawns_particles_confetti_and_message() {
        let mut fx = Effects::new(1, true);
        fx.on_lock(&clear_event(2));

        assert_eq!(fx.particles().len(), 2 * 10 * PARTICLES_PER_CELL);
        assert_eq!(fx.confetti().len(), 2 * CONFETTI_PER_ROW);
        assert_eq!(fx.message().unwrap().text, "DOUBLE");
        assert_eq!(fx.particles()[0].color, piece_color(PieceKind::I));
    }

    #[test]
    fn disabled_effects_still_show_message() {
        let mut fx = Effects::new(1, false);
        fx.on_lock(&clear_event(1));
        assert!(fx.particles().is_empty());
        assert!(fx.confetti().is_empty());
        assert_eq!(fx.message().unwrap().text, "LINE CLEAR");
    }

    #[test]
    fn effects_expire() {
        let mut fx = Effects::new(1, true);
        fx.on_lock(&clear_event(4));
        assert_eq!(fx.message().unwrap().text, "TETRIS!");

        // Particles last 50 frames, confetti 125 frames, the message 3s.
        fx.update(16 * 51);
        assert!(fx.particles().is_empty());
        assert!(!fx.confetti().is_empty());

        fx.update(16 * 75);
        assert!(fx.confetti().is_empty());
        assert!(fx.message().is_some());

        fx.update(MESSAGE_MS);
        assert!(fx.is_idle());
    }

    #[test]
    fn message_fades_in_and_out() {
        let mut msg = Message {
            text: "LINE CLEAR",
            remaining_ms: MESSAGE_MS,
        };
        assert_eq!(msg.opacity(), 0.0);
        msg.remaining_ms = MESSAGE_MS / 2;
        assert_eq!(msg.opacity(), 1.0);
        msg.remaining_ms = 150;
        assert!((msg.opacity() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn lock_without_clear_is_ignored() {
        let mut state = GameState::new(3);
        state.start();
        state.hard_drop();
        let event = state.take_last_event().unwrap();

        let mut fx = Effects::new(1, true);
        fx.on_lock(&event);
        assert!(fx.is_idle());
    }
}
