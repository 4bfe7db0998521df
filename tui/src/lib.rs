//! Terminal portfolio: one tall scrollable page with staggered section
//! entrances, a pointer glow, and a drifting particle backdrop.

use std::path::Path;

use color_eyre::eyre::Result;
use color_eyre::eyre::WrapErr;
use folio_content::Portfolio;
use folio_content::load_portfolio;
use rand::Rng;

mod app;
mod cli;
mod fx;
mod key_hint;
mod links;
mod logging;
mod page;
mod sections;
mod theme;
mod tui;

pub use cli::Cli;
pub use theme::ThemeName;

use crate::app::AppOptions;
use crate::app::run_app;
use crate::theme::Theme;
use crate::tui::Tui;
use crate::tui::install_panic_hook;

pub async fn run_main(cli: Cli) -> Result<()> {
    let _log_guard = logging::init(&cli.log_level)?;

    let (portfolio, content_dir) = match &cli.content {
        Some(path) => {
            let portfolio = load_portfolio(path)
                .wrap_err_with(|| format!("failed to load {}", path.display()))?;
            (portfolio, path.parent().map(Path::to_path_buf))
        }
        None => (Portfolio::sample(), None),
    };

    let options = AppOptions {
        theme: Theme::named(cli.theme),
        motion: !cli.reduced_motion,
        mouse: !cli.no_mouse,
        seed: cli.seed.unwrap_or_else(|| rand::rng().random()),
        content_dir,
    };

    install_panic_hook(options.mouse);
    let mut tui = Tui::new(options.mouse)?;
    tui.enter()?;
    let result = run_app(&mut tui, portfolio, options).await;
    tui.exit()?;
    Ok(result?)
}
