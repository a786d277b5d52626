//! Skill view models: category normalization, years of experience, and the
//! filter/sort rules behind the skills tab.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::portfolio::fields::{value_to_list, Field};
use crate::portfolio::stars::{star_states, StarState};
use crate::portfolio::PortfolioError;
use crate::store::Fields;

pub const DEFAULT_CATEGORY: &str = "Other";
pub const UNKNOWN_SINCE: &str = "—";

const NAME: Field = Field::new(&["Name"]);
const NOTES: Field = Field::new(&["Notes"]);
const LEVEL: Field = Field::new(&["Level"]);
const START_YEAR: Field = Field::new(&["startYear"]);
/// `Categories` (multi-select) replaced `Category` (single-select); the legacy
/// column is only consulted when the new one is absent.
const CATEGORIES: Field = Field::new(&["Categories", "Category"]);

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkillView {
    pub name: String,
    pub notes: String,
    pub level: i64,
    pub start_year: Option<String>,
    /// Never empty.
    pub categories: Vec<String>,
    /// First category; the grouping and sort key.
    pub primary: String,
}

pub fn normalize_skill(fields: &Fields) -> SkillView {
    let categories = normalize_categories(fields);
    let primary = categories[0].clone();

    SkillView {
        name: NAME.text_or(fields, ""),
        notes: NOTES.text_or(fields, ""),
        level: LEVEL.int(fields).unwrap_or(0),
        start_year: START_YEAR.text(fields),
        categories,
        primary,
    }
}

fn normalize_categories(fields: &Fields) -> Vec<String> {
    let categories = CATEGORIES
        .first_present(fields)
        .map(value_to_list)
        .unwrap_or_default();

    if categories.is_empty() {
        vec![DEFAULT_CATEGORY.to_string()]
    } else {
        categories
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Years of experience
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "state", content = "years", rename_all = "snake_case")]
pub enum YearsOfExperience {
    Known(i64),
    Unknown,
}

impl YearsOfExperience {
    /// Descending order with `Unknown` after every known value.
    pub fn cmp_desc(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => b.cmp(a),
            (Self::Known(_), Self::Unknown) => Ordering::Less,
            (Self::Unknown, Self::Known(_)) => Ordering::Greater,
            (Self::Unknown, Self::Unknown) => Ordering::Equal,
        }
    }
}

pub fn years_of_experience(skill: &SkillView, current_year: i64) -> YearsOfExperience {
    skill
        .start_year
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|start| current_year.checked_sub(start))
        .map(YearsOfExperience::Known)
        .unwrap_or(YearsOfExperience::Unknown)
}

/// Caption for the "Since" column: `"2015 - More than 9 years"`.
pub fn since_text(skill: &SkillView, years: YearsOfExperience) -> String {
    match (years, skill.start_year.as_deref()) {
        (YearsOfExperience::Known(n), Some(start)) if n >= 0 => {
            format!("{start} - More than {n} years")
        }
        _ => UNKNOWN_SINCE.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Filtering
// ────────────────────────────────────────────────────────────────────────────

/// Keeps skills sharing at least one category with `selected`.
/// An empty selection applies no filter.
pub fn filter_by_categories(items: Vec<SkillView>, selected: &[String]) -> Vec<SkillView> {
    if selected.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.categories.iter().any(|c| selected.contains(c)))
        .collect()
}

/// Sorted, de-duplicated option list for the category filter.
pub fn all_categories(items: &[SkillView]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.categories.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Sorting
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillSort {
    /// Primary category (A→Z), then level (high→low), then name.
    #[default]
    PrimaryCategory,
    /// Level (high→low), then name.
    Level,
    /// Years of experience (high→low, unknown last), then level, then name.
    Experience,
    /// Name (A→Z).
    Name,
}

impl SkillSort {
    pub fn label(&self) -> &'static str {
        match self {
            SkillSort::PrimaryCategory => "Primary category (A→Z), Level (High→Low)",
            SkillSort::Level => "Level (High→Low)",
            SkillSort::Experience => "Experience (High→Low)",
            SkillSort::Name => "Name (A→Z)",
        }
    }

    pub const ALL: [SkillSort; 4] = [
        SkillSort::PrimaryCategory,
        SkillSort::Level,
        SkillSort::Experience,
        SkillSort::Name,
    ];
}

impl FromStr for SkillSort {
    type Err = PortfolioError;

    /// Accepts the short query values as well as the full control labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let by_key = match s.to_ascii_lowercase().as_str() {
            "category" | "primary_category" => Some(SkillSort::PrimaryCategory),
            "level" => Some(SkillSort::Level),
            "experience" => Some(SkillSort::Experience),
            "name" => Some(SkillSort::Name),
            _ => None,
        };
        by_key
            .or_else(|| SkillSort::ALL.into_iter().find(|mode| mode.label() == s))
            .ok_or_else(|| PortfolioError::UnknownSort(s.to_string()))
    }
}

fn name_key(skill: &SkillView) -> String {
    skill.name.to_lowercase()
}

/// Stable sort under `mode`; every mode ends on case-insensitive name.
pub fn sort_skills(items: &mut [SkillView], mode: SkillSort, current_year: i64) {
    match mode {
        SkillSort::PrimaryCategory => items.sort_by(|a, b| {
            a.primary
                .to_lowercase()
                .cmp(&b.primary.to_lowercase())
                .then_with(|| b.level.cmp(&a.level))
                .then_with(|| name_key(a).cmp(&name_key(b)))
        }),
        SkillSort::Level => items.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then_with(|| name_key(a).cmp(&name_key(b)))
        }),
        SkillSort::Experience => items.sort_by(|a, b| {
            years_of_experience(a, current_year)
                .cmp_desc(&years_of_experience(b, current_year))
                .then_with(|| b.level.cmp(&a.level))
                .then_with(|| name_key(a).cmp(&name_key(b)))
        }),
        SkillSort::Name => items.sort_by_key(name_key),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Card
// ────────────────────────────────────────────────────────────────────────────

/// Render-ready skill: the view model plus its derived display values.
#[derive(Debug, Clone, Serialize)]
pub struct SkillCard {
    #[serde(flatten)]
    pub skill: SkillView,
    pub years: YearsOfExperience,
    pub since: String,
    pub stars: [StarState; 5],
}

impl SkillCard {
    pub fn new(skill: SkillView, current_year: i64) -> Self {
        let years = years_of_experience(&skill, current_year);
        let since = since_text(&skill, years);
        let stars = star_states(skill.level);
        Self {
            skill,
            years,
            since,
            stars,
        }
    }
}
