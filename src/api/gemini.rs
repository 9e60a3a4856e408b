use crate::error::{DirectorError, Result};
use crate::storyboard::{parse_storyboard, StoryboardOutcome};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// 固定的导演系统提示词，要求模型只输出三个分镜的 JSON 数组
const SYSTEM_INSTRUCTION: &str = r#"You are a professional Video Director Agent.
Your goal is to turn a user's topic into a structured storyboard.

Instructions:
1. Create a storyboard with exactly 3 scenes based on the user's input.
2. Return ONLY a valid JSON list. Do not include Markdown formatting (like ```json).
3. The JSON structure must be:
   [{"scene": 1, "visual_description": "Detailed prompt for image generation", "voiceover": "Script for the narrator"}]"#;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            api_key,
            model,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 把用户主题交给 Gemini 生成分镜脚本。
    /// 每次提交都发起新请求，不做缓存；解析失败回退为原文
    pub async fn generate_storyboard(&self, prompt: &str) -> Result<StoryboardOutcome> {
        info!("Requesting storyboard from {}...", self.model);

        let request_body = json!({
            "system_instruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ],
            "generationConfig": {
                "temperature": 0.7
            }
        });

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(DirectorError::ApiError(error_text));
        }

        let body = response.text().await?;
        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;
        let generated_text = extract_candidate_text(envelope)?;

        info!("Received {} characters from Gemini", generated_text.len());

        Ok(parse_storyboard(&generated_text))
    }
}

/// 从响应信封里取出第一个候选的文本
fn extract_candidate_text(envelope: GenerateContentResponse) -> Result<String> {
    let text = envelope
        .candidates
        .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
        .and_then(|c| c.content.parts)
        .and_then(|mut p| if p.is_empty() { None } else { Some(p.remove(0)) })
        .map(|p| p.text);

    text.ok_or_else(|| {
        DirectorError::EnvelopeError("response contained no candidate text".to_string())
    })
}
