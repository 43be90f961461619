// src/config.rs

use dotenvy::dotenv;
use std::env;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_base_url = env::var("QUERYBENCH_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string());

        let api_base_url = Url::parse(&api_base_url)
            .expect("QUERYBENCH_API_URL must be a valid URL");

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            api_base_url,
            rust_log,
        }
    }
}
