use std::fs;
use std::path::Path;

use crate::model::ContentError;
use crate::model::Portfolio;

/// Reads, parses, and validates a portfolio TOML file.
pub fn load_portfolio(path: &Path) -> Result<Portfolio, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let portfolio: Portfolio = toml::from_str(&raw).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    portfolio.validate()?;
    Ok(portfolio)
}
