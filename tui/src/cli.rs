use std::path::PathBuf;

use clap::Parser;

use crate::theme::ThemeName;

#[derive(Parser, Debug, Default)]
#[command(name = "folio", version, about = "Lexie's portfolio, as a terminal page")]
pub struct Cli {
    /// Portfolio content file (TOML). The built-in sample is used when
    /// omitted.
    #[arg(long = "content", short = 'c', value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Color palette.
    #[arg(long = "theme", value_enum, default_value_t = ThemeName::Moss)]
    pub theme: ThemeName,

    /// Skip entrance animations and ambient effects.
    #[arg(long = "reduced-motion", default_value_t = false)]
    pub reduced_motion: bool,

    /// Leave the mouse to the terminal; disables hover and the pointer
    /// glow but keeps text selection native.
    #[arg(long = "no-mouse", default_value_t = false)]
    pub no_mouse: bool,

    /// Backdrop seed, for reproducible runs.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Filter for the file log (error, warn, info, debug, trace).
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}
