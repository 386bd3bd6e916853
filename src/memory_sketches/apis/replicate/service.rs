use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tokio::time::{sleep, timeout_at, Instant};

use crate::{
    app::env::{self, Envy},
    memory_sketches::{
        enums::sketch_style::SketchStyle,
        errors::SketchApiError,
        generators::SketchGenerator,
        models::{
            generation_parameters::GenerationParameters, image_payload::ImagePayload,
            sketch_reference::SketchReference,
        },
        util::{
            moderation,
            prompts::{self, NEGATIVE_PROMPT},
            response,
        },
    },
};

use super::{
    config::PROVIDER,
    enums::replicate_prediction_status::ReplicatePredictionStatus,
    models::input_spec::{InputSpec, InputSpecSketchAdapter},
    structs::replicate_predictions_response::ReplicatePredictionsResponse,
};

/// Runs the sketch adapter model as a Replicate prediction and waits for it.
pub struct ReplicateSketcher {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    model_version: String,
    parameters: GenerationParameters,
    poll_interval: Duration,
    max_wait: Duration,
}

impl ReplicateSketcher {
    pub fn from_envy(client: reqwest::Client, envy: &Envy) -> Self {
        Self {
            client,
            api_key: env::credential(&envy.replicate_api_key),
            api_url: envy.replicate_api_url.trim_end_matches('/').to_string(),
            model_version: envy.replicate_model_version.to_string(),
            parameters: GenerationParameters::from_envy(envy),
            poll_interval: Duration::from_millis(envy.replicate_poll_interval_millis),
            max_wait: Duration::from_secs(envy.replicate_max_wait_secs),
        }
    }

    fn provide_input_spec(&self, image: &ImagePayload, style: SketchStyle) -> InputSpec {
        InputSpec {
            version: self.model_version.to_string(),
            input: InputSpecSketchAdapter {
                image: image.to_data_url(),
                prompt: prompts::style_prompt(style),
                negative_prompt: NEGATIVE_PROMPT.to_string(),
                num_inference_steps: self.parameters.num_inference_steps,
                guidance_scale: self.parameters.guidance_scale,
                adapter_conditioning_scale: self.parameters.adapter_conditioning_scale,
                strength: self.parameters.strength,
                seed: self.parameters.seed,
            },
        }
    }

    async fn create_prediction(
        &self,
        input_spec: &InputSpec,
        api_key: &str,
    ) -> Result<ReplicatePredictionsResponse, SketchApiError> {
        let url = format!("{}/predictions", self.api_url);
        let res = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, ["Token ", api_key].concat())
            .json(input_spec)
            .send()
            .await
            .map_err(|e| response::transport_error(PROVIDER, e))?;

        response::parse_json_response(PROVIDER, res).await
    }

    async fn get_prediction_by_id(
        &self,
        id: &str,
        api_key: &str,
    ) -> Result<ReplicatePredictionsResponse, SketchApiError> {
        let url = format!("{}/predictions/{}", self.api_url, id);
        let res = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, ["Token ", api_key].concat())
            .send()
            .await
            .map_err(|e| response::transport_error(PROVIDER, e))?;

        response::parse_json_response(PROVIDER, res).await
    }

    async fn await_prediction(
        &self,
        mut prediction: ReplicatePredictionsResponse,
        api_key: &str,
    ) -> Result<ReplicatePredictionsResponse, SketchApiError> {
        let deadline = Instant::now() + self.max_wait;

        while !prediction.status.is_terminal() {
            let now = Instant::now();
            if now >= deadline {
                return Err(self.timed_out(&prediction.id));
            }

            tracing::debug!("waiting for prediction {} ({:?})", prediction.id, prediction.status);
            sleep(self.poll_interval.min(deadline - now)).await;

            // a slow poll counts against the same deadline
            let id = prediction.id.clone();
            let poll = self.get_prediction_by_id(&id, api_key);
            prediction = match timeout_at(deadline, poll).await {
                Ok(polled) => polled?,
                Err(_) => return Err(self.timed_out(&id)),
            };
        }

        if prediction.status != ReplicatePredictionStatus::Succeeded {
            tracing::error!("prediction {} ended as {:?}", prediction.id, prediction.status);
            return Err(moderation::classify_provider_error(
                PROVIDER,
                prediction.error_message(),
            ));
        }

        Ok(prediction)
    }

    fn timed_out(&self, id: &str) -> SketchApiError {
        tracing::error!("prediction {} ran out of time", id);
        SketchApiError::Upstream {
            provider: PROVIDER,
            detail: format!(
                "prediction {} did not finish within {}s",
                id,
                self.max_wait.as_secs()
            ),
        }
    }
}

#[async_trait]
impl SketchGenerator for ReplicateSketcher {
    fn mode(&self) -> &'static str {
        PROVIDER
    }

    async fn generate_sketch(
        &self,
        image: &ImagePayload,
        style: SketchStyle,
    ) -> Result<SketchReference, SketchApiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SketchApiError::MissingCredential("REPLICATE_API_KEY"));
        };

        let input_spec = self.provide_input_spec(image, style);
        let prediction = self.create_prediction(&input_spec, api_key).await?;
        tracing::info!("created prediction {} with style {}", prediction.id, style);

        let prediction = self.await_prediction(prediction, api_key).await?;

        if let Some(seed) = get_seed_from_logs(prediction.logs.as_deref()) {
            tracing::debug!("prediction {} used seed {}", prediction.id, seed);
        }

        match prediction.output_url() {
            Some(url) => Ok(SketchReference::from_provider_string(url)),
            None => Err(SketchApiError::UnexpectedResponseShape {
                provider: PROVIDER,
                detail: format!("prediction {} has no image output", prediction.id),
            }),
        }
    }
}

fn get_seed_from_logs(logs: Option<&str>) -> Option<&str> {
    logs?.lines().next()?.strip_prefix("Using seed: ")
}
