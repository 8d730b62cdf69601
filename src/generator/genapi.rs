use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::Settings;
use crate::error::Error;
use crate::generator::{parse_draft, QuestionGenerator};
use crate::quiz::definition::QuizDraft;

/// Envelope of a synchronous gen-api answer.
#[derive(Deserialize)]
pub(crate) struct GenApiResponse {
    #[serde(default)]
    response: Vec<GenApiChoice>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GenApiChoice {
    message: GenApiMessage,
}

#[derive(Deserialize)]
struct GenApiMessage {
    content: String,
}

/// Text-generation backend reached through the gen-api.ru synchronous chat endpoint.
pub struct GenApiGenerator {
    client: Client,
    url: String,
    key: String,
}

impl GenApiGenerator {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.generation_timeout)
            .build()
            .context("Could not build HTTP client")?;
        Ok(GenApiGenerator {
            client,
            url: settings.genapi_url.clone(),
            key: settings.genapi_key.clone(),
        })
    }

    fn prompt(topic: &str, question_count: usize) -> String {
        format!(
            r#"Generate a quiz about "{topic}" in the following JSON format:
{{
  "title": "Quiz title",
  "category": "Category",
  "points_per_question": 1,
  "questions": [
    {{
      "topic": "Subtopic",
      "question_text": "Question text",
      "options": ["option 1", "option 2", "option 3", "option 4"],
      "correct_answer_indices": [0]
    }}
  ]
}}
Generate exactly {count} multiple-choice questions.
The questions must be different from each other and cover different aspects of the topic.
Write the quiz in the language of the topic."#,
            topic = topic,
            count = question_count
        )
    }
}

impl QuestionGenerator for GenApiGenerator {
    fn generate(&self, topic: &str, question_count: usize) -> Result<QuizDraft> {
        info!("Generating a {} question quiz about {:?}", question_count, topic);
        let payload = json!({
            "is_sync": true,
            "messages": [{
                "role": "user",
                "content": [{ "type": "text", "text": Self::prompt(topic, question_count) }],
            }],
            "stream": false,
            "n": 1,
            "max_tokens": 4000,
            "temperature": 0.7,
            "response_format": { "type": "json_object" },
        });

        let response: GenApiResponse = self
            .client
            .post(&self.url)
            .bearer_auth(&self.key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .context("Could not reach the quiz generator")?
            .json()
            .context("The quiz generator sent an unreadable response")?;

        parse_response(response, question_count)
    }
}

pub(crate) fn parse_response(body: GenApiResponse, question_count: usize) -> Result<QuizDraft> {
    let content = match (body.response.into_iter().next(), body.error) {
        (Some(choice), _) => choice.message.content,
        (None, Some(error)) => {
            let reason = format!("the generator failed: {}", error);
            return Err(Error::InvalidGeneratedContent(reason).into());
        }
        (None, None) => {
            return Err(Error::InvalidGeneratedContent("empty response".into()).into());
        }
    };
    debug!("Generated content: {}", content);

    parse_draft(&content, question_count)
}
