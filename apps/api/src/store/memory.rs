use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{Fields, RawRecord, RecordStore, SortSpec, StoreError};

/// In-process store for handler tests.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<HashMap<String, Vec<RawRecord>>>,
    failing: HashSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: &str, rows: Vec<Fields>) -> Self {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, fields)| RawRecord {
                id: format!("rec{table}{i}"),
                created_time: None,
                fields,
            })
            .collect();
        self.tables
            .lock()
            .unwrap()
            .insert(table.to_string(), records);
        self
    }

    /// Every call touching `table` answers with a 503.
    pub fn failing_on(mut self, table: &str) -> Self {
        self.failing.insert(table.to_string());
        self
    }

    pub fn rows(&self, table: &str) -> Vec<RawRecord> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self, table: &str) -> Result<(), StoreError> {
        if self.failing.contains(table) {
            return Err(StoreError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list(
        &self,
        table: &str,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        self.check(table)?;
        let mut records = self.rows(table);
        if let Some(sort) = sort {
            records.sort_by(|a, b| {
                compare_values(b.fields.get(&sort.field), a.fields.get(&sort.field))
            });
        }
        Ok(records)
    }

    async fn create(&self, table: &str, fields: Fields) -> Result<RawRecord, StoreError> {
        self.check(table)?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();
        let record = RawRecord {
            id: format!("rec{table}{}", rows.len()),
            created_time: None,
            fields,
        };
        rows.push(record.clone());
        Ok(record)
    }
}
