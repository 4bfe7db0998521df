//! Data model for a single-page portfolio: the profile, projects,
//! skill groups, resume pointer, and contact details that the terminal
//! UI renders, plus loading and validation of user-supplied TOML files.

mod loader;
mod model;

pub use loader::load_portfolio;
pub use model::Contact;
pub use model::ContentError;
pub use model::Portfolio;
pub use model::Profile;
pub use model::Project;
pub use model::ResumeSection;
pub use model::SectionId;
pub use model::SkillGroup;
