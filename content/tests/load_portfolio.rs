#![allow(clippy::unwrap_used)]

use std::fs;

use folio_content::ContentError;
use folio_content::load_portfolio;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const VALID: &str = r#"
about = "I write analytical engines."

[profile]
name = "Ada"
brand = "ada.codes"
tagline = "Build · Measure · Learn"
intro = "Compilers by day."

[[projects]]
title = "Difference Engine"
description = "Mechanical computation at scale."
stack = "Brass · Steam"

[[skills]]
title = "Mathematics"
items = ["Analysis", "Number theory"]

[resume]
summary = "A century of experience."
document = "ada.pdf"

[contact]
prompt = "Say hello."
email = "ada@example.com"
profile_url = "https://example.com/ada"
"#;

#[test]
fn loads_a_valid_portfolio_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portfolio.toml");
    fs::write(&path, VALID).unwrap();

    let portfolio = load_portfolio(&path).unwrap();
    assert_eq!(portfolio.profile.brand, "ada.codes");
    assert_eq!(portfolio.projects.len(), 1);
    assert_eq!(portfolio.projects[0].stack, "Brass · Steam");
    assert_eq!(portfolio.skills[0].items.len(), 2);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = load_portfolio(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ContentError::Read { .. }), "{err}");
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portfolio.toml");
    fs::write(&path, "[[projects]\ntitle = ").unwrap();

    let err = load_portfolio(&path).unwrap_err();
    assert!(matches!(err, ContentError::Parse { .. }), "{err}");
}

#[test]
fn semantically_invalid_content_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portfolio.toml");
    let duplicated = format!(
        "{VALID}\n[[projects]]\ntitle = \"Difference Engine\"\ndescription = \"Again.\"\nstack = \"Brass\"\n"
    );
    fs::write(&path, duplicated).unwrap();

    let err = load_portfolio(&path).unwrap_err();
    assert!(matches!(err, ContentError::Invalid(_)), "{err}");
    assert!(err.to_string().contains("duplicate project title"), "{err}");
}
