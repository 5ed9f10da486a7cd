//! Typed HTTP client for the admin catalog backend

use serde::de::DeserializeOwned;

use shared::response::{
    AppInfoData, AppInfoResponse, DynamicConfigResponse, FormResponse, LoginResponse,
    SplashResponse,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Thin reqwest wrapper over the backend's pull endpoints.
#[derive(Debug, Clone)]
pub struct AdminApi {
    client: reqwest::Client,
    base_url: String,
}

impl AdminApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "{path} returned status {status}"
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("{path}: {e}")))
    }

    /// Tenant auto-detection: `GET /api/admin/app-info`.
    pub async fn fetch_app_info(&self) -> ClientResult<AppInfoData> {
        let resp: AppInfoResponse = self.get_json("/api/admin/app-info").await?;
        if !resp.success || resp.data.admin_id.is_empty() {
            return Err(ClientError::InvalidResponse(
                "app-info reported no admin id".to_string(),
            ));
        }
        Ok(resp.data)
    }

    /// Full snapshot source: `GET /api/get-form?adminId=<id>`.
    pub async fn fetch_form(&self, admin_id: &str) -> ClientResult<FormResponse> {
        self.get_json(&format!("/api/get-form?adminId={admin_id}"))
            .await
    }

    /// Legacy snapshot shape: `GET /api/app/dynamic/<adminId>`.
    pub async fn fetch_dynamic(&self, admin_id: &str) -> ClientResult<DynamicConfigResponse> {
        self.get_json(&format!("/api/app/dynamic/{admin_id}")).await
    }

    /// Splash configuration: `GET /api/admin/splash?adminId=<id>`.
    pub async fn fetch_splash(&self, admin_id: &str) -> ClientResult<SplashResponse> {
        self.get_json(&format!("/api/admin/splash?adminId={admin_id}"))
            .await
    }

    /// Login. The core only consumes the success flag; tokens stay with
    /// the auth layer.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<bool> {
        let url = format!("{}/api/login", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Ok(false);
        }

        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("/api/login: {e}")))?;
        Ok(body.success)
    }
}
