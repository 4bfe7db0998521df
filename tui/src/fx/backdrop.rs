//! Decorative background layer: the particle field plus the parallax
//! coupling that makes it trail the content while scrolling.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::fx::particles::ParticleField;
use crate::theme::Theme;

/// Fraction of the scroll offset the backdrop follows. Less than 1.0,
/// so the backdrop visibly lags the content.
pub(crate) const PARALLAX: f32 = 0.4;

pub(crate) fn parallax_rows(scroll: usize) -> usize {
    (scroll as f32 * PARALLAX).floor() as usize
}

pub(crate) struct Backdrop {
    field: ParticleField,
}

impl Backdrop {
    pub(crate) fn new(seed: u64, enabled: bool) -> Self {
        Self {
            field: ParticleField::new(seed, enabled),
        }
    }

    pub(crate) fn ensure_size(&mut self, width: u16, height: u16) {
        self.field.ensure_size(width, height);
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        self.field.advance(dt);
    }

    pub(crate) fn is_animated(&self) -> bool {
        self.field.is_animated()
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, scroll: usize, theme: &Theme) {
        self.field.render(area, buf, parallax_rows(scroll), theme);
    }
}
