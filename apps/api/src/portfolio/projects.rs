use serde::Serialize;

use crate::portfolio::fields::Field;
use crate::store::RawRecord;

const NAME: Field = Field::new(&["Name"]);
const DESCRIPTION: Field = Field::new(&["Description"]);
const SKILLS: Field = Field::new(&["skills"]);
const KNOWLEDGE: Field = Field::new(&["Knowledge"]);
const LINK: Field = Field::new(&["link"]);
const IMAGE: Field = Field::new(&["image"]);

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub skills: Vec<String>,
    pub knowledge: Vec<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
}

pub fn normalize_project(record: &RawRecord) -> ProjectView {
    let fields = &record.fields;
    ProjectView {
        id: record.id.clone(),
        name: NAME.text_or(fields, ""),
        description: DESCRIPTION.text_or(fields, ""),
        skills: SKILLS.list(fields),
        knowledge: KNOWLEDGE.list(fields),
        link: LINK.text(fields),
        image_url: IMAGE.attachment_url(fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::fields::fields_from;
    use serde_json::json;

    fn record(fields: serde_json::Value) -> RawRecord {
        RawRecord {
            id: "recP1".to_string(),
            created_time: None,
            fields: fields_from(fields),
        }
    }

    #[test]
    fn test_full_project() {
        let view = normalize_project(&record(json!({
            "Name": "Sales dashboard",
            "Description": "KPIs for the sales team",
            "skills": ["Python", "Streamlit"],
            "Knowledge": ["Data viz"],
            "link": "https://github.com/me/dash",
            "image": [{"url": "https://cdn/dash.png", "filename": "dash.png"}]
        })));
        assert_eq!(view.id, "recP1");
        assert_eq!(view.skills, vec!["Python", "Streamlit"]);
        assert_eq!(view.knowledge, vec!["Data viz"]);
        assert_eq!(view.image_url.as_deref(), Some("https://cdn/dash.png"));
    }

    #[test]
    fn test_sparse_project_degrades_to_defaults() {
        let view = normalize_project(&record(json!({"Name": "WIP"})));
        assert_eq!(view.name, "WIP");
        assert!(view.skills.is_empty());
        assert!(view.knowledge.is_empty());
        assert!(view.link.is_none());
        assert!(view.image_url.is_none());
    }
}
