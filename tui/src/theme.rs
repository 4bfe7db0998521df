use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Selectable palette. `Moss` mirrors the dark zinc/emerald look the
/// page was designed around; the others are recolors of the same roles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Moss,
    Ember,
    Mono,
}

/// Resolved color roles for one theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: ThemeName,
    /// Page background, painted under everything else.
    pub bg: Color,
    /// Card background for project and skill tiles.
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub accent_soft: Color,
    /// Target color the pointer glow blends cell backgrounds toward.
    pub glow: Color,
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Moss => Self {
                name,
                bg: Color::Rgb(0x09, 0x09, 0x0b),
                surface: Color::Rgb(0x18, 0x18, 0x1b),
                border: Color::Rgb(0x27, 0x27, 0x2a),
                text: Color::Rgb(0xf4, 0xf4, 0xf5),
                dim: Color::Rgb(0xa1, 0xa1, 0xaa),
                accent: Color::Rgb(0x34, 0xd3, 0x99),
                accent_soft: Color::Rgb(0x6e, 0xe7, 0xb7),
                glow: Color::Rgb(0x10, 0xb9, 0x81),
            },
            ThemeName::Ember => Self {
                name,
                bg: Color::Rgb(0x0c, 0x0a, 0x09),
                surface: Color::Rgb(0x1c, 0x19, 0x17),
                border: Color::Rgb(0x29, 0x25, 0x24),
                text: Color::Rgb(0xf5, 0xf5, 0xf4),
                dim: Color::Rgb(0xa8, 0xa2, 0x9e),
                accent: Color::Rgb(0xfb, 0xbf, 0x24),
                accent_soft: Color::Rgb(0xfc, 0xd3, 0x4d),
                glow: Color::Rgb(0xf5, 0x9e, 0x0b),
            },
            ThemeName::Mono => Self {
                name,
                bg: Color::Rgb(0x0a, 0x0a, 0x0a),
                surface: Color::Rgb(0x17, 0x17, 0x17),
                border: Color::Rgb(0x26, 0x26, 0x26),
                text: Color::Rgb(0xfa, 0xfa, 0xfa),
                dim: Color::Rgb(0xa3, 0xa3, 0xa3),
                accent: Color::Rgb(0xe5, 0xe5, 0xe5),
                accent_soft: Color::Rgb(0xd4, 0xd4, 0xd4),
                glow: Color::Rgb(0x52, 0x52, 0x52),
            },
        }
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn body(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn outline(&self) -> Style {
        Style::default().fg(self.border)
    }
}

/// Linear RGB interpolation; `t` is clamped to `0.0..=1.0`. Non-RGB
/// colors cannot be mixed, so the nearer endpoint wins.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            let mix = |a: u8, b: u8| -> u8 {
                let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
                v.round().clamp(0.0, 255.0) as u8
            };
            Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}
