//! Confetti particle field
//!
//! [`ParticleEffect`] is what the sequencer talks to: an on/off switch plus
//! the canvas size. [`ConfettiField`] is the simulation behind the web card's
//! canvas. While active it keeps the field full, recycling pieces that fall
//! off the bottom; deactivating it clears the field at once.

use birthday_types::{Color, Viewport};

/// Particle renderer driven by the sequencer.
pub trait ParticleEffect {
    fn set_active(&mut self, active: bool);
    fn resize(&mut self, viewport: Viewport);
}

/// Pieces kept in the field while active
pub const DEFAULT_PARTICLE_COUNT: usize = 200;

/// Downward acceleration (px/s²)
const GRAVITY: f32 = 240.0;
/// Fall speed cap (px/s)
const TERMINAL_VELOCITY: f32 = 320.0;
/// Horizontal speed range at spawn (px/s)
const DRIFT: f32 = 90.0;

/// One confetti piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Rotation in radians
    pub angle: f32,
    /// Angular velocity (rad/s)
    pub spin: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

/// Seedable confetti simulation.
#[derive(Debug, Clone)]
pub struct ConfettiField {
    particles: Vec<Particle>,
    palette: Vec<Color>,
    viewport: Viewport,
    active: bool,
    particle_count: usize,
    rng: fastrand::Rng,
}

impl ConfettiField {
    /// Create an inactive, empty field drawing colors from `palette`.
    pub fn new(palette: Vec<Color>, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            palette,
            viewport: Viewport::default(),
            active: false,
            particle_count: DEFAULT_PARTICLE_COUNT,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True while the field is inactive and empty.
    pub fn is_settled(&self) -> bool {
        !self.active && self.particles.is_empty()
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !self.active || self.viewport.is_empty() {
            return;
        }

        let width = self.viewport.width as f32;
        let height = self.viewport.height as f32;

        while self.particles.len() < self.particle_count {
            // Stagger new pieces above the top edge so they arrive gradually
            let y = -self.rng.f32() * height;
            let piece = self.spawn(width, y);
            self.particles.push(piece);
        }

        for piece in &mut self.particles {
            piece.vy = (piece.vy + GRAVITY * dt).min(TERMINAL_VELOCITY);
            piece.x += piece.vx * dt;
            piece.y += piece.vy * dt;
            piece.angle += piece.spin * dt;
        }

        for i in 0..self.particles.len() {
            let piece = self.particles[i];
            let off_screen = piece.y - piece.height > height
                || piece.x + piece.width < 0.0
                || piece.x - piece.width > width;

            if off_screen {
                self.particles[i] = self.spawn(width, -piece.height);
            }
        }
    }

    fn spawn(&mut self, width: f32, y: f32) -> Particle {
        let color = if self.palette.is_empty() {
            [255, 255, 255, 255]
        } else {
            self.palette[self.rng.usize(0..self.palette.len())]
        };

        Particle {
            x: self.rng.f32() * width,
            y,
            vx: (self.rng.f32() * 2.0 - 1.0) * DRIFT,
            vy: self.rng.f32() * 60.0,
            angle: self.rng.f32() * std::f32::consts::TAU,
            spin: (self.rng.f32() * 2.0 - 1.0) * 6.0,
            width: 5.0 + self.rng.f32() * 15.0,
            height: 5.0 + self.rng.f32() * 5.0,
            color,
        }
    }
}

impl ParticleEffect for ConfettiField {
    fn set_active(&mut self, active: bool) {
        if self.active != active {
            tracing::debug!(active, "Confetti toggled");
        }
        self.active = active;
        if !active {
            self.particles.clear();
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [Color; 3] = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]];

    fn field() -> ConfettiField {
        let mut field = ConfettiField::new(PALETTE.to_vec(), 7).with_particle_count(50);
        field.resize(Viewport::new(800.0, 600.0));
        field
    }

    #[test]
    fn inactive_field_spawns_nothing() {
        let mut field = field();
        field.step(0.016);
        assert!(field.particles().is_empty());
        assert!(field.is_settled());
    }

    #[test]
    fn active_field_fills_to_count() {
        let mut field = field();
        field.set_active(true);
        field.step(0.016);
        assert_eq!(field.particles().len(), 50);

        // Recycling keeps the count stable over a long run
        for _ in 0..600 {
            field.step(0.016);
        }
        assert_eq!(field.particles().len(), 50);
        assert!(!field.is_settled());
    }

    #[test]
    fn pieces_use_palette_colors() {
        let mut field = field();
        field.set_active(true);
        field.step(0.016);
        assert!(field.particles().iter().all(|p| PALETTE.contains(&p.color)));
    }

    #[test]
    fn deactivated_field_clears_at_once() {
        let mut field = field();
        field.set_active(true);
        for _ in 0..120 {
            field.step(0.016);
        }
        assert_eq!(field.particles().len(), 50);

        field.set_active(false);
        assert!(field.is_settled());
        assert!(field.particles().is_empty());

        // Nothing comes back until the field is switched on again
        field.step(0.016);
        assert!(field.particles().is_empty());

        field.set_active(true);
        field.step(0.016);
        assert_eq!(field.particles().len(), 50);
    }

    #[test]
    fn empty_viewport_is_a_no_op() {
        let mut field = ConfettiField::new(PALETTE.to_vec(), 1);
        field.set_active(true);
        field.step(0.016);
        assert!(field.particles().is_empty());
        assert!(field.is_active());
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = field();
        let mut b = field();
        a.set_active(true);
        b.set_active(true);
        for _ in 0..10 {
            a.step(0.016);
            b.step(0.016);
        }
        assert_eq!(a.particles(), b.particles());
    }
}
