use gloo_net::http::Request;
use shared::api::ShellConfig;

const API_BASE_URL: &str = "/api";

pub struct ApiService;

impl ApiService {
    pub async fn get_shell_config() -> Result<ShellConfig, String> {
        let url = format!("{}/shell-config", API_BASE_URL);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }
}
