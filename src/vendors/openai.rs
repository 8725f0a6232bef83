// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::settings::RelevancySettings;
use crate::vendors::traits::{BusinessContext, Classification, RelevancyClassifier, VendorError};

/// OpenAI相关性分类器客户端
///
/// 通过Chat Completions接口对一批关键词做业务相关性二分类，
/// 要求模型以JSON对象返回 relevant_keywords / irrelevant_keywords 两个数组。
pub struct OpenAiClassifier {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct RelevancyPayload {
    #[serde(default)]
    relevant_keywords: Vec<String>,
    #[serde(default)]
    irrelevant_keywords: Vec<String>,
}

impl OpenAiClassifier {
    pub fn new(settings: &RelevancySettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }

    fn build_prompt(keywords: &[String], context: &BusinessContext) -> String {
        let icps = context
            .icps
            .iter()
            .enumerate()
            .map(|(i, icp)| format!("{}. {}", i + 1, icp))
            .collect::<Vec<_>>()
            .join("\n");
        let list = keywords
            .iter()
            .enumerate()
            .map(|(i, kw)| format!("{}. {}", i + 1, kw))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are a keyword relevancy expert. Categorize every keyword below as relevant or \
             irrelevant to this business.\n\n\
             BUSINESS CONTEXT:\nWebsite Domain: {}\nBusiness Summary: {}\n\n\
             Ideal Customer Profiles:\n{}\n\n\
             KEYWORDS TO FILTER:\n{}\n\n\
             Every keyword must appear in exactly one of relevant_keywords or \
             irrelevant_keywords. Do not alter, add or drop keywords. When in doubt, lean \
             towards inclusion.\n\
             Return a JSON object with \"relevant_keywords\" and \"irrelevant_keywords\" arrays.",
            context.domain, context.business_overview, icps, list
        )
    }
}

#[async_trait]
impl RelevancyClassifier for OpenAiClassifier {
    async fn classify(
        &self,
        keywords: &[String],
        context: &BusinessContext,
    ) -> Result<Classification, VendorError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": Self::build_prompt(keywords, context) }],
            "response_format": { "type": "json_object" },
            "temperature": 0.3,
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
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

        let parsed: ChatResponse = resp.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| VendorError::InvalidResponse("No choices in response".to_string()))?;

        if let Some(refusal) = choice.message.refusal {
            return Err(VendorError::Rejected(refusal));
        }

        let content = choice
            .message
            .content
            .ok_or_else(|| VendorError::InvalidResponse("No response content".to_string()))?;

        let payload: RelevancyPayload = serde_json::from_str(&content)
            .map_err(|e| VendorError::InvalidResponse(format!("Malformed JSON payload: {}", e)))?;

        Ok(Classification {
            relevant: payload.relevant_keywords,
            irrelevant: payload.irrelevant_keywords,
        })
    }
}
