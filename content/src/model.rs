use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::EnumIter;
use url::Url;

/// Everything the page renders, in document order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub about: String,
    pub projects: Vec<Project>,
    pub skills: Vec<SkillGroup>,
    pub resume: ResumeSection,
    pub contact: Contact,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// First name, used in the hero headline and the footer.
    pub name: String,
    /// Short brand string shown in the navigation bar.
    pub brand: String,
    /// One-line motto under the headline.
    pub tagline: String,
    /// Longer hero introduction, wrapped to the content column.
    pub intro: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Technology list rendered verbatim, e.g. `"AWS · Terraform · Grafana"`.
    pub stack: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub summary: String,
    /// Document handed to the platform opener, usually a PDF path.
    pub document: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub prompt: String,
    pub email: String,
    pub profile_url: String,
}

/// The anchor sections a visitor can jump to. The hero and the footer
/// are not anchors: they bound the page but never win the nav highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum SectionId {
    About,
    Projects,
    Skills,
    Resume,
    Contact,
}

impl SectionId {
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::About => "#about",
            SectionId::Projects => "#projects",
            SectionId::Skills => "#skills",
            SectionId::Resume => "#resume",
            SectionId::Contact => "#contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionId::About => "About",
            SectionId::Projects => "Projects",
            SectionId::Skills => "Skills",
            SectionId::Resume => "Resume",
            SectionId::Contact => "Contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SectionId {
    type Err = ContentError;

    /// Accepts `"about"` and `"#about"` forms, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('#').unwrap_or(s);
        match name.to_ascii_lowercase().as_str() {
            "about" => Ok(SectionId::About),
            "projects" => Ok(SectionId::Projects),
            "skills" => Ok(SectionId::Skills),
            "resume" => Ok(SectionId::Resume),
            "contact" => Ok(SectionId::Contact),
            _ => Err(ContentError::UnknownAnchor(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read portfolio file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse portfolio file `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid portfolio: {0}")]
    Invalid(String),
    #[error("unknown section anchor `{0}`")]
    UnknownAnchor(String),
}

impl Portfolio {
    /// Checks the structural rules the renderer relies on. Returns the
    /// first violation so the message stays actionable.
    pub fn validate(&self) -> Result<(), ContentError> {
        fn required(value: &str, field: &str) -> Result<(), ContentError> {
            if value.trim().is_empty() {
                return Err(ContentError::Invalid(format!("`{field}` must not be empty")));
            }
            Ok(())
        }

        required(&self.profile.name, "profile.name")?;
        required(&self.profile.brand, "profile.brand")?;
        required(&self.profile.tagline, "profile.tagline")?;
        required(&self.profile.intro, "profile.intro")?;
        required(&self.about, "about")?;

        if self.projects.is_empty() {
            return Err(ContentError::Invalid("at least one project is required".to_string()));
        }
        let mut titles: HashSet<&str> = HashSet::new();
        for (i, project) in self.projects.iter().enumerate() {
            required(&project.title, &format!("projects[{i}].title"))?;
            required(&project.description, &format!("projects[{i}].description"))?;
            required(&project.stack, &format!("projects[{i}].stack"))?;
            if !titles.insert(project.title.as_str()) {
                return Err(ContentError::Invalid(format!(
                    "duplicate project title `{}`",
                    project.title
                )));
            }
        }

        if self.skills.is_empty() {
            return Err(ContentError::Invalid("at least one skill group is required".to_string()));
        }
        let mut groups: HashSet<&str> = HashSet::new();
        for (i, group) in self.skills.iter().enumerate() {
            required(&group.title, &format!("skills[{i}].title"))?;
            if group.items.is_empty() {
                return Err(ContentError::Invalid(format!(
                    "skill group `{}` has no items",
                    group.title
                )));
            }
            for (j, item) in group.items.iter().enumerate() {
                required(item, &format!("skills[{i}].items[{j}]"))?;
            }
            if !groups.insert(group.title.as_str()) {
                return Err(ContentError::Invalid(format!(
                    "duplicate skill group `{}`",
                    group.title
                )));
            }
        }

        required(&self.resume.summary, "resume.summary")?;
        if self.resume.document.as_os_str().is_empty() {
            return Err(ContentError::Invalid("`resume.document` must not be empty".to_string()));
        }

        required(&self.contact.prompt, "contact.prompt")?;
        let email = self.contact.email.trim();
        if !email.contains('@') || email.contains(char::is_whitespace) {
            return Err(ContentError::Invalid(format!(
                "`contact.email` is not an email address: `{email}`"
            )));
        }
        let url = Url::parse(&self.contact.profile_url).map_err(|e| {
            ContentError::Invalid(format!(
                "`contact.profile_url` is not a URL: `{}` ({e})",
                self.contact.profile_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ContentError::Invalid(format!(
                "`contact.profile_url` must be http(s), got `{}`",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Built-in demo content, used when no portfolio file is given.
    pub fn sample() -> Self {
        Self {
            profile: Profile {
                name: "Lexie".to_string(),
                brand: "Lexie.dev".to_string(),
                tagline: "Optimize · Empower · Elevate".to_string(),
                intro: "Cloud engineering, automation, and operational excellence, \
                        designed with care for both systems and people."
                    .to_string(),
            },
            about: "I'm a cloud-focused engineer who values clarity, stability, and \
                    human-centered design. I love building systems that feel quiet when \
                    they're working, because that's when everything is right."
                .to_string(),
            projects: vec![
                Project {
                    title: "Cloud Monitoring Dashboard".to_string(),
                    description: "Centralized observability improving alert confidence \
                                  and uptime."
                        .to_string(),
                    stack: "AWS · Terraform · Grafana".to_string(),
                },
                Project {
                    title: "Automated Infrastructure Platform".to_string(),
                    description: "Repeatable infrastructure workflows reducing toil \
                                  and error rates."
                        .to_string(),
                    stack: "Terraform · CI/CD".to_string(),
                },
                Project {
                    title: "Secure Event-Driven Pipeline".to_string(),
                    description: "Scalable, auditable pipeline built for reliability \
                                  and trust."
                        .to_string(),
                    stack: "Python · AWS Lambda · S3".to_string(),
                },
            ],
            skills: vec![
                SkillGroup {
                    title: "Cloud".to_string(),
                    items: vec![
                        "AWS".to_string(),
                        "IAM".to_string(),
                        "Monitoring".to_string(),
                        "Networking".to_string(),
                    ],
                },
                SkillGroup {
                    title: "Automation".to_string(),
                    items: vec![
                        "Terraform".to_string(),
                        "CI/CD".to_string(),
                        "Scripting".to_string(),
                    ],
                },
                SkillGroup {
                    title: "Reliability".to_string(),
                    items: vec![
                        "Observability".to_string(),
                        "Incident Response".to_string(),
                        "Optimization".to_string(),
                    ],
                },
            ],
            resume: ResumeSection {
                summary: "Cloud-focused Systems Administrator with 2+ years of \
                          experience supporting hybrid Windows and Microsoft 365 \
                          environments. Specialized in Entra ID, automation, and \
                          Tier III troubleshooting."
                    .to_string(),
                document: PathBuf::from("Alexis-Chaffin-Resume.pdf"),
            },
            contact: Contact {
                prompt: "Interested in collaborating or just saying hi?".to_string(),
                email: "hello@lexie.dev".to_string(),
                profile_url: "https://github.com/lexiedev".to_string(),
            },
        }
    }
}
