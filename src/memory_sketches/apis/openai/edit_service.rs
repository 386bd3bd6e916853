use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::{
    app::{
        env::{self, Envy},
        util::data_url,
    },
    memory_sketches::{
        enums::sketch_style::SketchStyle,
        errors::SketchApiError,
        generators::SketchGenerator,
        models::{
            generation_parameters::GenerationParameters, image_payload::ImagePayload,
            sketch_reference::SketchReference,
        },
        util::{prompts, response},
    },
};

use super::{config::IMAGE_EDIT_PROVIDER, structs::image_edit_response::ImageEditResponse};

/// Sends the upload straight to the image edit endpoint.
pub struct OpenAiEditSketcher {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
    parameters: GenerationParameters,
}

impl OpenAiEditSketcher {
    pub fn from_envy(client: reqwest::Client, envy: &Envy) -> Self {
        Self {
            client,
            api_key: env::credential(&envy.openai_api_key),
            api_url: envy.openai_api_url.trim_end_matches('/').to_string(),
            model: envy.openai_image_model.to_string(),
            parameters: GenerationParameters::from_envy(envy),
        }
    }

    fn provide_form(&self, image: &ImagePayload, style: SketchStyle) -> Result<Form, SketchApiError> {
        let part = Part::bytes(image.data.to_vec())
            .file_name(image.file_name())
            .mime_str(image.mime_type.essence_str())
            .map_err(|e| SketchApiError::InvalidImage(e.to_string()))?;

        Ok(Form::new()
            .text("model", self.model.to_string())
            .text("prompt", prompts::edit_prompt(style))
            .text("n", "1")
            .text("size", self.parameters.size.to_string())
            .part("image", part))
    }
}

#[async_trait]
impl SketchGenerator for OpenAiEditSketcher {
    fn mode(&self) -> &'static str {
        IMAGE_EDIT_PROVIDER
    }

    async fn generate_sketch(
        &self,
        image: &ImagePayload,
        style: SketchStyle,
    ) -> Result<SketchReference, SketchApiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SketchApiError::MissingCredential("OPENAI_API_KEY"));
        };

        let form = self.provide_form(image, style)?;
        let url = format!("{}/images/edits", self.api_url);
        let res = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| response::transport_error(IMAGE_EDIT_PROVIDER, e))?;

        let edit: ImageEditResponse = response::parse_json_response(IMAGE_EDIT_PROVIDER, res).await?;

        let Some(first) = edit.data.into_iter().next() else {
            return Err(SketchApiError::UnexpectedResponseShape {
                provider: IMAGE_EDIT_PROVIDER,
                detail: "no image data".to_string(),
            });
        };

        if let Some(url) = first.url.filter(|url| !url.is_empty()) {
            return Ok(SketchReference::from_provider_string(&url));
        }

        match first.b64_json.filter(|b64| !b64.is_empty()) {
            Some(b64) => Ok(SketchReference::DataUrl(
                [data_url::PREFIX, mime::IMAGE_PNG.essence_str(), ";base64,", &b64].concat(),
            )),
            None => Err(SketchApiError::UnexpectedResponseShape {
                provider: IMAGE_EDIT_PROVIDER,
                detail: "neither url nor b64_json present".to_string(),
            }),
        }
    }
}
