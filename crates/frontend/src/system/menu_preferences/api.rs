//! HTTP transport for menu preferences.

use async_trait::async_trait;
use contracts::shared::api_response::ApiResponse;
use contracts::system::menu_preferences::SaveCustomMenuRequest;
use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;

use crate::shared::api_utils::{api_base, join_url};
use crate::shared::browser_storage;

pub const STANDARD_MENU_PATH: &str = "/admin/menu-raw/configurations/active";
pub const CUSTOM_MENU_PATH: &str = "/user/menu-preferences/custom-menu";

/// Backend calls used by the menu preferences gateway. Envelope payloads
/// stay untyped JSON here; interpreting them is the gateway's job.
#[async_trait(?Send)]
pub trait MenuApi {
    async fn fetch_standard_menu(&self) -> Result<ApiResponse<Value>, String>;
    async fn fetch_user_menu(&self) -> Result<ApiResponse<Value>, String>;
    async fn save_user_menu(
        &self,
        request: &SaveCustomMenuRequest,
    ) -> Result<ApiResponse<Value>, String>;
}

pub struct HttpMenuApi {
    base_url: String,
}

impl HttpMenuApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Backend on the page's host, resolved once
    pub fn from_window(api_port: u16) -> Self {
        Self::new(api_base(api_port))
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn with_auth(request: RequestBuilder) -> RequestBuilder {
    match browser_storage::get_access_token() {
        Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
        None => request,
    }
}

async fn get_envelope(url: &str) -> Result<ApiResponse<Value>, String> {
    let response = with_auth(Request::get(url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed: {}", response.status()));
    }

    response
        .json::<ApiResponse<Value>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[async_trait(?Send)]
impl MenuApi for HttpMenuApi {
    async fn fetch_standard_menu(&self) -> Result<ApiResponse<Value>, String> {
        get_envelope(&self.url(STANDARD_MENU_PATH)).await
    }

    async fn fetch_user_menu(&self) -> Result<ApiResponse<Value>, String> {
        get_envelope(&self.url(CUSTOM_MENU_PATH)).await
    }

    async fn save_user_menu(
        &self,
        request: &SaveCustomMenuRequest,
    ) -> Result<ApiResponse<Value>, String> {
        let response = with_auth(Request::post(&self.url(CUSTOM_MENU_PATH)))
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.ok() {
            return Err(format!("Failed to save menu: {}", response.status()));
        }

        response
            .json::<ApiResponse<Value>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_use_resolved_base() {
        let api = HttpMenuApi::new("http://localhost:3000/");
        assert_eq!(
            api.url(CUSTOM_MENU_PATH),
            "http://localhost:3000/user/menu-preferences/custom-menu"
        );
        assert_eq!(
            api.url(STANDARD_MENU_PATH),
            "http://localhost:3000/admin/menu-raw/configurations/active"
        );
    }
}
