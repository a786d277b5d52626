//! View-model normalizer. Turns weakly typed store rows into render-ready
//! structures. Pure functions only; the store is reached through `service`.

use thiserror::Error;

pub mod contact;
pub mod experience;
pub mod fields;
pub mod handlers;
pub mod profile;
pub mod projects;
pub mod service;
pub mod skills;
pub mod stars;
pub mod theme;

/// Table names in the store base.
pub mod tables {
    pub const PROFILE: &str = "profile";
    pub const SKILLS: &str = "skills";
    pub const PROJECTS: &str = "projects";
    pub const EXPERIENCE: &str = "experience";
    pub const CONTACTS: &str = "contacts";
}

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("The profile table has no rows")]
    MissingProfile,

    #[error("The profile is missing the required field '{0}'")]
    MissingProfileField(&'static str),

    #[error("Unknown sort mode '{0}'")]
    UnknownSort(String),
}
