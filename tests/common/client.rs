//! HTTP client for end-to-end tests
//!
//! A high-level wrapper over reqwest with one method per endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Song Endpoints
    // ========================================================================

    /// GET /api/songs with optional q/language filters
    pub async fn list_songs(&self, q: Option<&str>, language: Option<&str>) -> Response {
        let mut request = self.client.get(format!("{}/api/songs", self.base_url));
        if let Some(q) = q {
            request = request.query(&[("q", q)]);
        }
        if let Some(language) = language {
            request = request.query(&[("language", language)]);
        }
        request.send().await.expect("List songs request failed")
    }

    /// GET /api/songs/{id}
    pub async fn get_song(&self, id: u64) -> Response {
        self.client
            .get(format!("{}/api/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Get song request failed")
    }

    /// POST /api/songs
    pub async fn create_song(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/songs", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Create song request failed")
    }

    /// DELETE /api/songs/{id}
    pub async fn delete_song(&self, id: u64) -> Response {
        self.client
            .delete(format!("{}/api/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete song request failed")
    }

    // ========================================================================
    // Gallery & Files Endpoints
    // ========================================================================

    /// GET /api/gallery or /api/files
    pub async fn list_records(&self, collection: &str) -> Response {
        self.client
            .get(format!("{}/api/{}", self.base_url, collection))
            .send()
            .await
            .expect("List records request failed")
    }

    /// POST /api/gallery or /api/files
    pub async fn create_record(&self, collection: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/{}", self.base_url, collection))
            .json(body)
            .send()
            .await
            .expect("Create record request failed")
    }

    /// DELETE /api/gallery/{id} or /api/files/{id}
    pub async fn delete_record(&self, collection: &str, id: u64) -> Response {
        self.client
            .delete(format!("{}/api/{}/{}", self.base_url, collection, id))
            .send()
            .await
            .expect("Delete record request failed")
    }

    // ========================================================================
    // Submission Endpoints
    // ========================================================================

    /// POST /api/contact, /api/donate, /api/register or /api/chat
    pub async fn post_submission(&self, endpoint: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/{}", self.base_url, endpoint))
            .json(body)
            .send()
            .await
            .expect("Submission request failed")
    }
}
