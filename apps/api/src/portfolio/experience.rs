use std::cmp::Reverse;

use serde::Serialize;

use crate::portfolio::fields::Field;
use crate::store::Fields;

pub const PRESENT: &str = "Present";

const ROLE: Field = Field::new(&["Role"]);
const COMPANY: Field = Field::new(&["Company"]);
const LOCATION: Field = Field::new(&["Location"]);
const START: Field = Field::new(&["startYear", "startDate"]);
const END: Field = Field::new(&["endYear", "endDate"]);
const DESCRIPTION: Field = Field::new(&["Description"]);
const TECHS: Field = Field::new(&["Technologies", "Skills"]);
const COMPANY_LINK: Field = Field::new(&["link_company"]);
const COMPANY_LOGO: Field = Field::new(&["image_company"]);

/// Store column the experience table is fetched in (descending) order of.
pub const SORT_FIELD: &str = "startYear";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExperienceView {
    pub role: String,
    pub company: String,
    pub location: Option<String>,
    /// Year or date, whichever the row carries; empty when neither.
    pub start: String,
    /// Year or date; `"Present"` for an ongoing position.
    pub end: String,
    pub description: String,
    pub techs: Vec<String>,
    pub company_link: Option<String>,
    pub company_logo_url: Option<String>,
}

pub fn normalize_experience(fields: &Fields) -> ExperienceView {
    ExperienceView {
        role: ROLE.text_or(fields, ""),
        company: COMPANY.text_or(fields, ""),
        location: LOCATION.text(fields),
        start: START.text_or(fields, ""),
        end: END.text_or(fields, PRESENT),
        description: DESCRIPTION.text_or(fields, ""),
        techs: TECHS.list(fields),
        company_link: COMPANY_LINK.text(fields),
        company_logo_url: COMPANY_LOGO.attachment_url(fields),
    }
}

/// Most recent start first. A start is ranked by the year in its leading
/// digits (`"2019"` and `"2019-05-01"` both count as 2019), then by its full
/// text. Starts without a leading year follow every dated one, and a missing
/// start goes last. Same start: company, then role (A→Z).
pub fn sort_experience(items: &mut [ExperienceView]) {
    items.sort_by_cached_key(|item| {
        (
            StartKey::parse(&item.start),
            item.company.to_lowercase(),
            item.role.to_lowercase(),
        )
    });
}

/// Ascending order of this key is newest-first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum StartKey {
    Year(Reverse<i64>, Reverse<String>),
    Undated(Reverse<String>),
    Missing,
}

impl StartKey {
    fn parse(start: &str) -> Self {
        let start = start.trim();
        if start.is_empty() {
            return Self::Missing;
        }
        let digits_end = start
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(start.len());
        match start[..digits_end].parse::<i64>() {
            Ok(year) => Self::Year(Reverse(year), Reverse(start.to_string())),
            Err(_) => Self::Undated(Reverse(start.to_string())),
        }
    }
}
