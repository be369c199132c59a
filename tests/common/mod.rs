use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use chatfront::api::HttpChatApi;
use chatfront::config::ApiConfig;

/// Client pointed at a wiremock server
#[allow(dead_code)]
pub fn api_for(base_url: &str) -> HttpChatApi {
    HttpChatApi::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        ..ApiConfig::default()
    })
    .expect("valid api config")
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
