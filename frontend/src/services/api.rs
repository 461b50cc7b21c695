use gloo::net::http::{Request, Response};
use shared::{ApiError, Expense, ExpensePayload, Insights, Period, Summary};

use crate::auth::AuthSession;

const DEFAULT_BACKEND_URL: &str = "https://moneynotes-oi32.onrender.com";

/// API client for the expenses backend. Every request carries a fresh
/// bearer token obtained from the auth bridge.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    auth: AuthSession,
}

impl ApiClient {
    /// Create a client against the default backend.
    pub fn new(auth: AuthSession) -> Self {
        Self {
            base_url: format!("{}/api", DEFAULT_BACKEND_URL),
            auth,
        }
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: String, auth: AuthSession) -> Self {
        Self { base_url, auth }
    }

    /// Resolve the base URL from the deployment environment: Vercel hosts
    /// proxy the API under the page's own origin.
    pub fn from_window(auth: AuthSession) -> Self {
        let on_vercel = web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .map(|host| host.ends_with(".vercel.app"))
            .unwrap_or(false);
        if on_vercel {
            Self::with_base_url("/api".to_string(), auth)
        } else {
            Self::new(auth)
        }
    }

    async fn auth_header(&self) -> Option<String> {
        self.auth.token().await.map(|t| format!("Bearer {}", t))
    }

    async fn server_error(response: Response) -> ApiError {
        ApiError::Server {
            status: response.status(),
            body: response.text().await.unwrap_or_default(),
        }
    }

    /// List expenses within an optional date range, optionally filtered by
    /// search text.
    pub async fn list_expenses(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Expense>, ApiError> {
        let url = format!("{}/expenses/", self.base_url);
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(start) = start {
            query.push(("start", start));
        }
        if let Some(end) = end {
            query.push(("end", end));
        }
        if let Some(search) = search {
            query.push(("search", search));
        }

        let mut builder = Request::get(&url).query(query);
        if let Some(auth) = self.auth_header().await {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(Self::server_error(response).await);
        }
        response
            .json::<Vec<Expense>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetch the aggregate summary for the given period and optional
    /// explicit range.
    pub async fn get_summary(
        &self,
        period: Period,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Summary, ApiError> {
        let url = format!("{}/expenses/summary/", self.base_url);
        self.get_json(&url, period, start, end).await
    }

    /// Fetch the AI insights for the given period and optional explicit
    /// range. Callers are expected to throttle this.
    pub async fn get_insights(
        &self,
        period: Period,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Insights, ApiError> {
        let url = format!("{}/expenses/insights/", self.base_url);
        self.get_json(&url, period, start, end).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        period: Period,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut query: Vec<(&str, &str)> = vec![("period", period.as_str())];
        if let (Some(start), Some(end)) = (start, end) {
            query.push(("start", start));
            query.push(("end", end));
        }

        let mut builder = Request::get(url).query(query);
        if let Some(auth) = self.auth_header().await {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(Self::server_error(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Create a new expense.
    pub async fn create_expense(&self, payload: &ExpensePayload) -> Result<Expense, ApiError> {
        let url = format!("{}/expenses/", self.base_url);
        let mut builder = Request::post(&url);
        if let Some(auth) = self.auth_header().await {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .json(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(Self::server_error(response).await);
        }
        response
            .json::<Expense>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Full-replace update of an existing expense.
    pub async fn update_expense(
        &self,
        id: i64,
        payload: &ExpensePayload,
    ) -> Result<Expense, ApiError> {
        let url = format!("{}/expenses/{}/", self.base_url, id);
        let mut builder = Request::put(&url);
        if let Some(auth) = self.auth_header().await {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .json(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(Self::server_error(response).await);
        }
        response
            .json::<Expense>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Delete an expense by id.
    pub async fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/expenses/{}/", self.base_url, id);
        let mut builder = Request::delete(&url);
        if let Some(auth) = self.auth_header().await {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(Self::server_error(response).await);
        }
        Ok(())
    }
}
