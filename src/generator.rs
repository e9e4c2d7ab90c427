use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use adcopy_lab::config::GeneratorConfig;
use adcopy_lab::variation::GeneratedCopy;

/// Client for the external copy-generation collaborator: an
/// OpenAI-compatible chat-completions endpoint that returns candidate
/// headlines and descriptions for one tone.
#[derive(Clone)]
pub struct GeneratorClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeneratorClient {
    pub fn from_env(config: &GeneratorConfig) -> Option<Self> {
        let api_key = env::var("ADCOPY_API_KEY").ok()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .ok()?;
        Some(Self {
            client,
            api_key,
            api_base: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    pub async fn generate_copy(
        &self,
        keywords: &[String],
        tone: &str,
        num_headlines: usize,
        num_descriptions: usize,
    ) -> Result<GeneratedCopy, String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: 0.7,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt(num_headlines, num_descriptions),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Tone: {}\nKeywords: {}", tone, keywords.join(", ")),
                },
            ],
        };

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| format!("generation request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| String::new());
            let detail = error_body.trim();
            if detail.is_empty() {
                return Err(format!("generation API error: {}", status));
            }
            return Err(format!("generation API error: {} {}", status, detail));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| format!("generation response parse failed: {}", err))?;

        let content = body
            .choices
            .first()
            .ok_or_else(|| "generation response missing choices".to_string())?
            .message
            .content
            .trim()
            .to_string();

        let json =
            extract_json(&content).ok_or_else(|| "generation response missing JSON".to_string())?;
        let raw: GeneratedCopy = serde_json::from_str(&json)
            .map_err(|err| format!("generation JSON parse failed: {}", err))?;

        Ok(clean_copy(raw, num_headlines, num_descriptions))
    }
}

fn clean_copy(raw: GeneratedCopy, num_headlines: usize, num_descriptions: usize) -> GeneratedCopy {
    GeneratedCopy {
        headlines: raw
            .headlines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .take(num_headlines)
            .collect(),
        descriptions: raw
            .descriptions
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .take(num_descriptions)
            .collect(),
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

fn system_prompt(num_headlines: usize, num_descriptions: usize) -> String {
    format!(
        r#"You are a strict JSON-only generator of Spanish search-ad copy.
Return a single JSON object with these fields:
- headlines (array of {} strings, each 30 characters or fewer)
- descriptions (array of {} strings, each 90 characters or fewer)
Rules:
- Match the requested tone and work the keywords in naturally.
- No exclamation or question marks, no ALL CAPS.
- Output JSON only, no markdown or commentary.
"#,
        num_headlines, num_descriptions
    )
}

fn extract_json(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(text[start..=end].to_string())
}
