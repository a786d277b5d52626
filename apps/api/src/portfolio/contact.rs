use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Fields;

/// A message left through the contact form. Written once, never read back.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub notes: String,
}

impl ContactSubmission {
    /// Column layout of the contacts table.
    pub fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("Name".to_string(), Value::String(self.name));
        fields.insert("email".to_string(), Value::String(self.email));
        fields.insert("phoneNumber".to_string(), Value::String(self.phone_number));
        fields.insert("Notes".to_string(), Value::String(self.notes));
        fields
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub id: String,
    pub message: &'static str,
}

pub const CONFIRMATION: &str = "Message sent";
