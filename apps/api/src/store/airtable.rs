use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Fields, RawRecord, RecordStore, SortSpec, StoreError};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ListResponse {
    records: Vec<RawRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    fields: &'a Fields,
}

/// The service reports errors either as a bare code or as a typed object.
#[derive(Debug, Deserialize)]
struct AirtableError {
    error: AirtableErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AirtableErrorBody {
    Detailed { message: String },
    Code(String),
}

/// REST client for an Airtable base.
/// One request per call, no retries: a failed fetch surfaces to the caller.
#[derive(Clone)]
pub struct AirtableClient {
    client: Client,
    api_url: String,
    base_id: String,
    api_key: String,
}

impl AirtableClient {
    pub fn new(api_url: &str, base_id: &str, api_key: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            base_id: base_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.api_url, self.base_id, table)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Store API returned {}: {}", status, body);
        Err(StoreError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Query parameters for one page of a list call.
fn list_query(sort: Option<&SortSpec>, offset: Option<&str>) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(sort) = sort {
        params.push(("sort[0][field]".to_string(), sort.field.clone()));
        params.push(("sort[0][direction]".to_string(), "desc".to_string()));
    }
    if let Some(offset) = offset {
        params.push(("offset".to_string(), offset.to_string()));
    }
    params
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<AirtableError>(body) {
        Ok(AirtableError {
            error: AirtableErrorBody::Detailed { message },
        }) => message,
        Ok(AirtableError {
            error: AirtableErrorBody::Code(code),
        }) => code,
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn list(
        &self,
        table: &str,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let url = self.table_url(table);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        // The service pages its rows; follow the cursor until it is exhausted.
        loop {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.api_key)
                .query(&list_query(sort, offset.as_deref()))
                .send()
                .await?;

            let page: ListResponse = Self::check(response).await?.json().await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!("Fetched {} rows from '{}'", records.len(), table);
        Ok(records)
    }

    async fn create(&self, table: &str, fields: Fields) -> Result<RawRecord, StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .bearer_auth(&self.api_key)
            .json(&CreateRequest { fields: &fields })
            .send()
            .await?;

        let record: RawRecord = Self::check(response).await?.json().await?;
        debug!("Created row {} in '{}'", record.id, table);
        Ok(record)
    }
}
