// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use crate::config::settings::KeywordSettings;
use crate::vendors::traits::{KeywordLookupClient, KeywordSuggestion, VendorError};

/// Ahrefs关键词建议供应商客户端（经RapidAPI接入）
///
/// 供应商对一个种子关键词返回两组建议（"Ideas" 与 "Questions"），
/// 此处合并为一个扁平列表返回。
pub struct AhrefsSuggestClient {
    client: reqwest::Client,
    base_url: String,
    host: String,
    api_key: String,
    country: String,
    search_engine: String,
}

#[derive(Deserialize)]
struct SuggestionItem {
    keyword: String,
    difficulty: Option<String>,
    volume: Option<String>,
    #[serde(rename = "lastUpdated")]
    last_updated: Option<String>,
}

#[derive(Deserialize)]
struct SuggestionsResponse {
    #[serde(rename = "Ideas", default)]
    ideas: Vec<serde_json::Value>,
    #[serde(rename = "Questions", default)]
    questions: Vec<serde_json::Value>,
}

impl AhrefsSuggestClient {
    pub fn new(settings: &KeywordSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            host: settings.rapidapi_host.clone(),
            api_key: settings.rapidapi_key.clone(),
            country: settings.country.clone(),
            search_engine: settings.search_engine.clone(),
        }
    }

    fn map_item(raw: serde_json::Value) -> Option<KeywordSuggestion> {
        let item: SuggestionItem = serde_json::from_value(raw.clone()).ok()?;
        let last_updated = item
            .last_updated
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok());

        Some(KeywordSuggestion {
            keyword: item.keyword,
            volume: item.volume,
            difficulty: item.difficulty,
            last_updated,
            raw,
        })
    }
}

#[async_trait]
impl KeywordLookupClient for AhrefsSuggestClient {
    async fn lookup(&self, seed_keyword: &str) -> Result<Vec<KeywordSuggestion>, VendorError> {
        let url = format!("{}/keyword_suggestions", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", &self.api_key)
            .query(&[
                ("keyword", seed_keyword),
                ("country", self.country.as_str()),
                ("se", self.search_engine.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(VendorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SuggestionsResponse = resp.json().await?;
        let suggestions: Vec<KeywordSuggestion> = parsed
            .ideas
            .into_iter()
            .chain(parsed.questions)
            .filter_map(Self::map_item)
            .collect();

        debug!(
            seed = seed_keyword,
            count = suggestions.len(),
            "Fetched keyword suggestions"
        );
        Ok(suggestions)
    }
}
