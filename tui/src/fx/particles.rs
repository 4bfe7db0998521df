//! Ambient particle field: a handful of dim glyphs drifting slowly up
//! the viewport. Particles only ever land on blank page-background
//! cells, so content and cards always win.

use std::time::Duration;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;

use crate::theme::Theme;

const GLYPHS: [char; 3] = ['·', '.', '*'];
const CELLS_PER_PARTICLE: u32 = 60;
const MIN_COUNT: usize = 16;
const MAX_COUNT: usize = 80;

#[derive(Clone, Copy, Debug)]
struct Particle {
    x: f32,
    y: f32,
    /// Rows per second of upward drift.
    speed: f32,
    glyph: char,
}

pub(crate) struct ParticleField {
    particles: Vec<Particle>,
    width: u16,
    height: u16,
    rng: StdRng,
    enabled: bool,
}

impl ParticleField {
    pub(crate) fn new(seed: u64, enabled: bool) -> Self {
        Self {
            particles: Vec::new(),
            width: 0,
            height: 0,
            rng: StdRng::seed_from_u64(seed),
            enabled,
        }
    }

    pub(crate) fn is_animated(&self) -> bool {
        self.enabled && !self.particles.is_empty()
    }

    /// Seeds the field for a viewport size. Only an actual size change
    /// re-seeds, so a fixed seed gives a reproducible backdrop.
    pub(crate) fn ensure_size(&mut self, width: u16, height: u16) {
        if !self.enabled || (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        if width == 0 || height == 0 {
            self.particles.clear();
            return;
        }
        let cells = u32::from(width) * u32::from(height);
        let count = ((cells / CELLS_PER_PARTICLE) as usize).clamp(MIN_COUNT, MAX_COUNT);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Self::spawn(&mut self.rng, width, height));
        }
        self.particles = particles;
    }

    fn spawn(rng: &mut StdRng, width: u16, height: u16) -> Particle {
        Particle {
            x: rng.random_range(0.0..f32::from(width)),
            y: rng.random_range(0.0..f32::from(height)),
            speed: rng.random_range(0.6..2.2),
            glyph: GLYPHS[rng.random_range(0..GLYPHS.len())],
        }
    }

    /// Drifts every particle up; ones that leave the top re-enter at the
    /// bottom in a fresh column.
    pub(crate) fn advance(&mut self, dt: Duration) {
        if !self.enabled || self.height == 0 {
            return;
        }
        let dt = dt.as_secs_f32();
        let width = f32::from(self.width);
        let height = f32::from(self.height);
        for particle in &mut self.particles {
            particle.y -= particle.speed * dt;
            if particle.y < 0.0 {
                particle.y = (particle.y % height) + height;
                particle.x = self.rng.random_range(0.0..width);
            }
        }
    }

    /// Draws particles shifted down by `parallax_rows` (wrapping), into
    /// cells that still show blank page background.
    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, parallax_rows: usize, theme: &Theme) {
        if !self.enabled || area.is_empty() {
            return;
        }
        let style = Style::default().fg(theme.dim).add_modifier(Modifier::DIM);
        let span_h = u32::from(area.height);
        let shift = parallax_rows as u32 % span_h;
        for particle in &self.particles {
            let col = particle.x.floor() as u32;
            let row = particle.y.floor() as u32;
            if col >= u32::from(area.width) || row >= span_h {
                continue;
            }
            let row = (row + span_h - shift) % span_h;
            let x = area.left() + col as u16;
            let y = area.top() + row as u16;
            let cell = &mut buf[(x, y)];
            if cell.symbol() != " " || cell.bg != theme.bg {
                continue;
            }
            cell.set_char(particle.glyph);
            cell.set_style(style);
        }
    }
}
