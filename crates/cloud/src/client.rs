//! REST client for the finance tracker's hosted database.
//!
//! Speaks PostgREST conventions: one table per collection under `/rest/v1`,
//! filters in the query string, inserted/updated rows echoed back with
//! `Prefer: return=representation`.

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

use finance_tracker_core::categories::{Category, CategoryUpdate, NewCategory};
use finance_tracker_core::transactions::{
    normalize_optional_text, NewTransaction, Transaction, TransactionType, TransactionUpdate,
};

use crate::config::CloudConfig;
use crate::error::{CloudError, Result};
use crate::types::*;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

const CATEGORIES_TABLE: &str = "categories";
const TRANSACTIONS_TABLE: &str = "transactions";
/// Columns selected for transactions, with the owning category joined in.
const TRANSACTION_SELECT: &str = "*,category:categories(id,name,type)";

const APIKEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "prefer";

/// Client for the hosted categories/transactions tables.
#[derive(Debug, Clone)]
pub struct CloudStoreClient {
    client: reqwest::Client,
    config: CloudConfig,
}

impl CloudStoreClient {
    fn log_response(status: reqwest::StatusCode, body: &str) {
        if status.is_success() {
            debug!("API response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("API response error ({}): {}", status, preview);
    }

    /// Create a new client.
    pub fn new(config: CloudConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(CloudError::config("Base URL must not be empty"));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client from `FINANCE_TRACKER_SUPABASE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(CloudConfig::from_env()?)
    }

    /// Same client, acting as the given signed-in user.
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone().with_access_token(token),
        }
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    fn table_url(&self, table: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}/rest/v1/{}", self.config.base_url, table);
        let params = query
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }

    /// Create headers for an API request.
    fn headers(&self, return_representation: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let key_value = HeaderValue::from_str(&self.config.api_key)
            .map_err(|_| CloudError::auth("Invalid API key format"))?;
        headers.insert(HeaderName::from_static(APIKEY_HEADER), key_value);

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.config.bearer_token()))
            .map_err(|_| CloudError::auth("Invalid access token format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        if return_representation {
            headers.insert(
                HeaderName::from_static(PREFER_HEADER),
                HeaderValue::from_static("return=representation"),
            );
        }

        Ok(headers)
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(CloudError::api(status.as_u16(), error.describe()));
            }
            return Err(CloudError::api(
                status.as_u16(),
                format!("Request failed: {}", body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "Failed to deserialize response. Body: {}, Error: {}",
                body,
                e
            );
            CloudError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    /// Check status of a response whose body is not needed.
    async fn expect_success(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            debug!("API response status: {}", status);
            return Ok(());
        }
        let body = response.text().await?;
        Self::log_response(status, &body);
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(error) => Err(CloudError::api(status.as_u16(), error.describe())),
            Err(_) => Err(CloudError::api(
                status.as_u16(),
                format!("Request failed: {}", body),
            )),
        }
    }

    fn single_row<T>(mut rows: Vec<T>, what: &str) -> Result<T> {
        match rows.len() {
            1 => Ok(rows.remove(0)),
            0 => Err(CloudError::api(404, format!("{} not found", what))),
            n => Err(CloudError::invalid_request(format!(
                "Expected one {} row, got {}",
                what, n
            ))),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Categories
    // ─────────────────────────────────────────────────────────────────────────

    /// List categories ordered by type then name.
    ///
    /// GET /rest/v1/categories?select=*&order=type.asc,name.asc
    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let url = self.table_url(
            CATEGORIES_TABLE,
            &[
                ("select", "*".to_string()),
                ("order", "type.asc,name.asc".to_string()),
            ],
        );

        let response = self
            .client
            .get(&url)
            .headers(self.headers(false)?)
            .send()
            .await?;

        let rows: Vec<CategoryRow> = Self::parse_response(response).await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Insert categories in a single request.
    ///
    /// POST /rest/v1/categories
    pub async fn batch_create_categories(
        &self,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.table_url(CATEGORIES_TABLE, &[("select", "*".to_string())]);
        let body: Vec<NewCategoryRow> = categories.into_iter().map(NewCategoryRow::from).collect();
        debug!("Batch creating {} categories", body.len());

        let response = self
            .client
            .post(&url)
            .headers(self.headers(true)?)
            .json(&body)
            .send()
            .await?;

        let rows: Vec<CategoryRow> = Self::parse_response(response).await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Insert one custom category.
    pub async fn create_category(&self, category: NewCategory) -> Result<Category> {
        let category = NewCategory::custom(
            category.category_type,
            category.name,
            normalize_optional_text(category.description.as_deref()),
        );
        let rows = self.batch_create_categories(vec![category]).await?;
        Self::single_row(rows, "category")
    }

    /// Update name and/or description of a category.
    ///
    /// PATCH /rest/v1/categories?id=eq.{id}
    pub async fn update_category(&self, id: &str, update: CategoryUpdate) -> Result<Category> {
        let mut patch = serde_json::Map::new();
        if let Some(name) = update.name {
            patch.insert("name".to_string(), serde_json::Value::String(name));
        }
        if let Some(description) = update.description {
            patch.insert(
                "description".to_string(),
                serde_json::to_value(normalize_optional_text(Some(&description)))?,
            );
        }
        if patch.is_empty() {
            return Err(CloudError::invalid_request("Empty category update"));
        }

        let url = self.table_url(
            CATEGORIES_TABLE,
            &[("id", format!("eq.{}", id)), ("select", "*".to_string())],
        );

        let response = self
            .client
            .patch(&url)
            .headers(self.headers(true)?)
            .json(&patch)
            .send()
            .await?;

        let rows: Vec<CategoryRow> = Self::parse_response(response).await?;
        Self::single_row(rows, "category").map(Category::from)
    }

    /// Delete a custom category. Default categories are filtered out server side.
    ///
    /// DELETE /rest/v1/categories?id=eq.{id}&is_default=eq.false
    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let url = self.table_url(
            CATEGORIES_TABLE,
            &[
                ("id", format!("eq.{}", id)),
                ("is_default", "eq.false".to_string()),
            ],
        );

        let response = self
            .client
            .delete(&url)
            .headers(self.headers(false)?)
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Look up a category by type and exact name.
    ///
    /// GET /rest/v1/categories?select=*&type=eq.{type}&name=eq.{name}&limit=1
    pub async fn find_category(
        &self,
        category_type: TransactionType,
        name: &str,
    ) -> Result<Option<Category>> {
        let url = self.table_url(
            CATEGORIES_TABLE,
            &[
                ("select", "*".to_string()),
                ("type", format!("eq.{}", category_type)),
                ("name", format!("eq.{}", name)),
                ("limit", "1".to_string()),
            ],
        );

        let response = self
            .client
            .get(&url)
            .headers(self.headers(false)?)
            .send()
            .await?;

        let rows: Vec<CategoryRow> = Self::parse_response(response).await?;
        Ok(rows.into_iter().next().map(Category::from))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────

    /// List transactions, newest first, with their category.
    ///
    /// GET /rest/v1/transactions?select=*,category:categories(id,name,type)&order=date.desc
    pub async fn fetch_transactions(&self) -> Result<Vec<Transaction>> {
        let url = self.table_url(
            TRANSACTIONS_TABLE,
            &[
                ("select", TRANSACTION_SELECT.to_string()),
                ("order", "date.desc".to_string()),
            ],
        );

        let response = self
            .client
            .get(&url)
            .headers(self.headers(false)?)
            .send()
            .await?;

        let rows: Vec<TransactionRow> = Self::parse_response(response).await?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    /// Insert transactions in a single request.
    ///
    /// POST /rest/v1/transactions
    pub async fn batch_create_transactions(
        &self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>> {
        if transactions.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.table_url(
            TRANSACTIONS_TABLE,
            &[("select", TRANSACTION_SELECT.to_string())],
        );
        let body: Vec<NewTransactionRow> = transactions
            .into_iter()
            .map(NewTransactionRow::from)
            .collect();
        debug!("Batch creating {} transactions", body.len());

        let response = self
            .client
            .post(&url)
            .headers(self.headers(true)?)
            .json(&body)
            .send()
            .await?;

        let rows: Vec<TransactionRow> = Self::parse_response(response).await?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    pub async fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction> {
        let rows = self.batch_create_transactions(vec![transaction]).await?;
        Self::single_row(rows, "transaction")
    }

    /// Apply a partial update. A blank comment clears it.
    ///
    /// PATCH /rest/v1/transactions?id=eq.{id}
    pub async fn update_transaction(
        &self,
        id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut patch = serde_json::Map::new();
        if let Some(transaction_type) = update.transaction_type {
            patch.insert("type".to_string(), serde_json::to_value(transaction_type)?);
        }
        if let Some(amount) = update.amount {
            patch.insert("amount".to_string(), serde_json::to_value(amount)?);
        }
        if let Some(date) = update.date {
            patch.insert("date".to_string(), serde_json::to_value(date)?);
        }
        if let Some(category_id) = update.category_id {
            patch.insert(
                "category_id".to_string(),
                serde_json::Value::String(category_id.as_str().to_string()),
            );
        }
        if let Some(comment) = update.comment {
            patch.insert(
                "comment".to_string(),
                serde_json::to_value(normalize_optional_text(Some(&comment)))?,
            );
        }
        if patch.is_empty() {
            return Err(CloudError::invalid_request("Empty transaction update"));
        }

        let url = self.table_url(
            TRANSACTIONS_TABLE,
            &[
                ("id", format!("eq.{}", id)),
                ("select", TRANSACTION_SELECT.to_string()),
            ],
        );

        let response = self
            .client
            .patch(&url)
            .headers(self.headers(true)?)
            .json(&patch)
            .send()
            .await?;

        let rows: Vec<TransactionRow> = Self::parse_response(response).await?;
        Self::single_row(rows, "transaction").map(Transaction::from)
    }

    /// DELETE /rest/v1/transactions?id=eq.{id}
    pub async fn delete_transaction(&self, id: &str) -> Result<()> {
        let url = self.table_url(TRANSACTIONS_TABLE, &[("id", format!("eq.{}", id))]);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers(false)?)
            .send()
            .await?;

        Self::expect_success(response).await
    }
}
