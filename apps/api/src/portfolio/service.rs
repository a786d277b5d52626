//! Page assembly. Fetches each collection fresh and runs it through the
//! normalizer. One store round trip per collection, no caching.

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::portfolio::contact::{ContactReceipt, ContactSubmission, CONFIRMATION};
use crate::portfolio::experience::{self, normalize_experience, sort_experience, ExperienceView};
use crate::portfolio::profile::{normalize_profile, ProfileView};
use crate::portfolio::projects::{normalize_project, ProjectView};
use crate::portfolio::skills::{
    all_categories, filter_by_categories, normalize_skill, sort_skills, SkillCard, SkillSort,
};
use crate::portfolio::tables;
use crate::portfolio::theme::Theme;
use crate::portfolio::PortfolioError;
use crate::store::{RecordStore, SortSpec};

pub const NO_SKILLS: &str = "No skills found.";
pub const NO_PROJECTS: &str = "No projects found.";
pub const NO_EXPERIENCE: &str = "No experience added yet.";

/// Store column the skills table is fetched in (descending) order of.
const SKILLS_SORT_FIELD: &str = "Level";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Filter and ordering chosen on the skills tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillQuery {
    pub categories: Vec<String>,
    pub sort: SkillSort,
}

impl SkillQuery {
    /// `categories` is a comma-separated label list; blank entries are ignored.
    pub fn parse(categories: Option<&str>, sort: Option<&str>) -> Result<Self, PortfolioError> {
        let categories = categories
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.parse()?,
            None => SkillSort::default(),
        };

        Ok(Self { categories, sort })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillsSection {
    pub items: Vec<SkillCard>,
    /// Every category present before filtering; the filter's option list.
    pub categories: Vec<String>,
    pub selected: Vec<String>,
    pub sort: SkillSort,
    pub sort_label: &'static str,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsSection {
    pub items: Vec<ProjectView>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceSection {
    pub items: Vec<ExperienceView>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPage {
    pub profile: ProfileView,
    pub theme: Theme,
    pub experience: ExperienceSection,
    pub skills: SkillsSection,
    pub projects: ProjectsSection,
}

fn placeholder<T>(items: &[T], message: &'static str) -> Option<&'static str> {
    items.is_empty().then_some(message)
}

// ────────────────────────────────────────────────────────────────────────────
// Loaders
// ────────────────────────────────────────────────────────────────────────────

pub async fn load_profile(store: &dyn RecordStore) -> Result<ProfileView, AppError> {
    let records = store.list(tables::PROFILE, None).await?;
    Ok(normalize_profile(&records)?)
}

pub async fn load_skills(
    store: &dyn RecordStore,
    query: &SkillQuery,
    current_year: i64,
) -> Result<SkillsSection, AppError> {
    let sort = SortSpec::descending(SKILLS_SORT_FIELD);
    let records = store.list(tables::SKILLS, Some(&sort)).await?;

    let skills: Vec<_> = records.iter().map(|r| normalize_skill(&r.fields)).collect();
    let categories = all_categories(&skills);

    let mut shown = filter_by_categories(skills, &query.categories);
    sort_skills(&mut shown, query.sort, current_year);
    debug!(
        "Skills: {} of {} shown (sort: {:?})",
        shown.len(),
        records.len(),
        query.sort
    );

    let items: Vec<SkillCard> = shown
        .into_iter()
        .map(|skill| SkillCard::new(skill, current_year))
        .collect();

    Ok(SkillsSection {
        empty_message: placeholder(&items, NO_SKILLS),
        items,
        categories,
        selected: query.categories.clone(),
        sort: query.sort,
        sort_label: query.sort.label(),
    })
}

pub async fn load_projects(store: &dyn RecordStore) -> Result<ProjectsSection, AppError> {
    let records = store.list(tables::PROJECTS, None).await?;
    let items: Vec<ProjectView> = records.iter().map(normalize_project).collect();

    Ok(ProjectsSection {
        empty_message: placeholder(&items, NO_PROJECTS),
        items,
    })
}

pub async fn load_experience(store: &dyn RecordStore) -> Result<ExperienceSection, AppError> {
    let sort = SortSpec::descending(experience::SORT_FIELD);
    let records = store.list(tables::EXPERIENCE, Some(&sort)).await?;

    let mut items: Vec<ExperienceView> = records
        .iter()
        .map(|r| normalize_experience(&r.fields))
        .collect();
    sort_experience(&mut items);

    Ok(ExperienceSection {
        empty_message: placeholder(&items, NO_EXPERIENCE),
        items,
    })
}

/// Whole page. The profile is resolved first: a page without a profile name
/// fails before any other collection is fetched.
pub async fn load_portfolio(
    store: &dyn RecordStore,
    query: &SkillQuery,
    current_year: i64,
    theme: &Theme,
) -> Result<PortfolioPage, AppError> {
    let profile = load_profile(store).await?;
    let experience = load_experience(store).await?;
    let skills = load_skills(store, query, current_year).await?;
    let projects = load_projects(store).await?;

    Ok(PortfolioPage {
        profile,
        theme: theme.clone(),
        experience,
        skills,
        projects,
    })
}

pub async fn submit_contact(
    store: &dyn RecordStore,
    submission: ContactSubmission,
) -> Result<ContactReceipt, AppError> {
    let record = store
        .create(tables::CONTACTS, submission.into_fields())
        .await?;
    info!("Contact message stored as {}", record.id);

    Ok(ContactReceipt {
        id: record.id,
        message: CONFIRMATION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::fields::fields_from;
    use crate::portfolio::skills::YearsOfExperience;
    use crate::store::memory::InMemoryStore;
    use crate::store::StoreError;
    use serde_json::json;

    fn skill_rows() -> Vec<crate::store::Fields> {
        vec![
            fields_from(json!({"Name": "Rust", "Level": 4, "Categories": ["Backend"], "startYear": "2020"})),
            fields_from(json!({"Name": "Go", "Level": 4, "Categories": ["Backend"], "startYear": "2018"})),
            fields_from(json!({"Name": "Pandas", "Level": 5, "Category": "Data"})),
        ]
    }

    fn names(section: &SkillsSection) -> Vec<&str> {
        section.items.iter().map(|c| c.skill.name.as_str()).collect()
    }

    #[test]
    fn test_query_parse_defaults() {
        let query = SkillQuery::parse(None, None).unwrap();
        assert!(query.categories.is_empty());
        assert_eq!(query.sort, SkillSort::PrimaryCategory);
    }

    #[test]
    fn test_query_parse_categories_and_sort() {
        let query = SkillQuery::parse(Some("Backend, Data,,"), Some("experience")).unwrap();
        assert_eq!(query.categories, vec!["Backend", "Data"]);
        assert_eq!(query.sort, SkillSort::Experience);
    }

    #[test]
    fn test_query_parse_rejects_unknown_sort() {
        assert!(SkillQuery::parse(None, Some("stars")).is_err());
    }

    #[tokio::test]
    async fn test_level_sort_breaks_ties_on_name() {
        let store = InMemoryStore::new().with_rows(tables::SKILLS, skill_rows());
        let query = SkillQuery {
            categories: vec![],
            sort: SkillSort::Level,
        };
        let section = load_skills(&store, &query, 2024).await.unwrap();
        assert_eq!(names(&section), vec!["Pandas", "Go", "Rust"]);
        assert_eq!(section.categories, vec!["Backend", "Data"]);
        assert!(section.empty_message.is_none());
    }

    #[tokio::test]
    async fn test_filtered_skills_keep_full_category_options() {
        let store = InMemoryStore::new().with_rows(tables::SKILLS, skill_rows());
        let query = SkillQuery::parse(Some("Data"), None).unwrap();
        let section = load_skills(&store, &query, 2024).await.unwrap();
        assert_eq!(names(&section), vec!["Pandas"]);
        assert_eq!(section.categories, vec!["Backend", "Data"]);
        assert_eq!(section.items[0].years, YearsOfExperience::Unknown);
    }

    #[tokio::test]
    async fn test_empty_tables_render_placeholders() {
        let store = InMemoryStore::new();
        let skills = load_skills(&store, &SkillQuery::default(), 2024).await.unwrap();
        assert_eq!(skills.empty_message, Some(NO_SKILLS));
        let projects = load_projects(&store).await.unwrap();
        assert_eq!(projects.empty_message, Some(NO_PROJECTS));
        let experience = load_experience(&store).await.unwrap();
        assert_eq!(experience.empty_message, Some(NO_EXPERIENCE));
    }

    #[tokio::test]
    async fn test_experience_sorted_most_recent_first() {
        let store = InMemoryStore::new().with_rows(
            tables::EXPERIENCE,
            vec![
                fields_from(json!({"Company": "Beta", "startYear": 2019, "endYear": 2021})),
                fields_from(json!({"Company": "Acme", "startYear": 2022})),
                fields_from(json!({"Company": "Alpha", "startYear": 2019})),
            ],
        );
        let section = load_experience(&store).await.unwrap();
        let companies: Vec<_> = section.items.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["Acme", "Alpha", "Beta"]);
        assert_eq!(section.items[0].end, "Present");
        assert_eq!(section.items[2].end, "2021");
    }

    #[tokio::test]
    async fn test_portfolio_requires_profile_name_first() {
        let store = InMemoryStore::new()
            .with_rows(tables::PROFILE, vec![fields_from(json!({"tagline": "hi"}))])
            .failing_on(tables::SKILLS);
        let theme = Theme::from_hex("#1565C0");
        let err = load_portfolio(&store, &SkillQuery::default(), 2024, &theme)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_portfolio_propagates_store_failure() {
        let store = InMemoryStore::new()
            .with_rows(tables::PROFILE, vec![fields_from(json!({"Name": "Ada"}))])
            .failing_on(tables::PROJECTS);
        let theme = Theme::from_hex("#1565C0");
        let err = load_portfolio(&store, &SkillQuery::default(), 2024, &theme)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_submit_contact_writes_one_row() {
        let store = InMemoryStore::new();
        let receipt = submit_contact(
            &store,
            ContactSubmission {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                phone_number: String::new(),
                notes: "Hello".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(receipt.message, CONFIRMATION);

        let rows = store.rows(tables::CONTACTS);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, receipt.id);
        assert_eq!(rows[0].fields["email"], "grace@example.com");
    }
}
