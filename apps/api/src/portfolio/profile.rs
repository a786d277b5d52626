use serde::Serialize;

use crate::portfolio::fields::Field;
use crate::portfolio::PortfolioError;
use crate::store::RawRecord;

const NAME_COLUMN: &str = "Name";
const NAME: Field = Field::new(&[NAME_COLUMN]);
const DESCRIPTION: Field = Field::new(&["Description"]);
const TAGLINE: Field = Field::new(&["tagline"]);
const LINKEDIN: Field = Field::new(&["linkedin"]);
const EMAIL: Field = Field::new(&["email"]);
const GITHUB: Field = Field::new(&["github"]);
const PICTURE: Field = Field::new(&["picture"]);
/// A CV is either uploaded as an attachment or linked directly.
const CV_ATTACHMENT: Field = Field::new(&["cv", "CV", "resume"]);
const CV_URL: Field = Field::new(&["cvUrl"]);

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileView {
    pub name: String,
    pub description: String,
    pub tagline: String,
    pub linkedin: Option<String>,
    pub email: Option<String>,
    pub github: Option<String>,
    pub picture_url: Option<String>,
    pub cv_url: Option<String>,
}

/// Builds the profile from the first row of the profile table.
///
/// The table must hold a row with a `Name`; anything else is optional.
pub fn normalize_profile(records: &[RawRecord]) -> Result<ProfileView, PortfolioError> {
    let fields = &records.first().ok_or(PortfolioError::MissingProfile)?.fields;

    let name = NAME
        .text(fields)
        .ok_or(PortfolioError::MissingProfileField(NAME_COLUMN))?;

    Ok(ProfileView {
        name,
        description: DESCRIPTION.text_or(fields, ""),
        tagline: TAGLINE.text_or(fields, ""),
        linkedin: LINKEDIN.text(fields),
        email: EMAIL.text(fields),
        github: GITHUB.text(fields),
        picture_url: PICTURE.attachment_url(fields),
        cv_url: CV_ATTACHMENT
            .attachment_url(fields)
            .or_else(|| CV_URL.text(fields)),
    })
}
