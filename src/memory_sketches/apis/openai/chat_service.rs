use async_trait::async_trait;

use crate::{
    app::env::{self, Envy},
    memory_sketches::{
        errors::SketchApiError,
        generators::BackstoryGenerator,
        models::image_payload::ImagePayload,
        util::{
            prompts::{BACKSTORY_SYSTEM_INSTRUCTION, BACKSTORY_USER_INSTRUCTION},
            response,
        },
    },
};

use super::{
    config::CHAT_PROVIDER,
    models::chat_completion_request::{
        ChatCompletionRequest, ChatMessage, ContentPart, ImageUrl, MessageContent,
    },
    structs::chat_completion_response::ChatCompletionResponse,
};

/// Writes the backstory with a vision capable chat completion model.
pub struct OpenAiBackstoryWriter {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiBackstoryWriter {
    pub fn from_envy(client: reqwest::Client, envy: &Envy) -> Self {
        Self {
            client,
            api_key: env::credential(&envy.openai_api_key),
            api_url: envy.openai_api_url.trim_end_matches('/').to_string(),
            model: envy.openai_chat_model.to_string(),
            max_tokens: envy.backstory_max_tokens,
            temperature: envy.backstory_temperature,
        }
    }

    fn provide_request(&self, image: &ImagePayload) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(BACKSTORY_SYSTEM_INSTRUCTION.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: BACKSTORY_USER_INSTRUCTION.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image.to_data_url(),
                            },
                        },
                    ]),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl BackstoryGenerator for OpenAiBackstoryWriter {
    fn mode(&self) -> &'static str {
        CHAT_PROVIDER
    }

    async fn generate_backstory(&self, image: &ImagePayload) -> Result<String, SketchApiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SketchApiError::MissingCredential("OPENAI_API_KEY"));
        };

        let url = format!("{}/chat/completions", self.api_url);
        let res = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&self.provide_request(image))
            .send()
            .await
            .map_err(|e| response::transport_error(CHAT_PROVIDER, e))?;

        let completion: ChatCompletionResponse =
            response::parse_json_response(CHAT_PROVIDER, res).await?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.text())
            .unwrap_or_default();
        let backstory = text.trim();

        if backstory.is_empty() {
            return Err(SketchApiError::UnexpectedResponseShape {
                provider: CHAT_PROVIDER,
                detail: "completion has no text".to_string(),
            });
        }

        Ok(backstory.to_string())
    }
}
