use serde::Deserialize;

use crate::memory_sketches::apis::replicate::config::ReplicateModelVersion;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub replicate_api_key: Option<String>,
    pub openai_api_key: Option<String>,

    #[serde(default = "default_image_provider")]
    pub image_provider: String,
    #[serde(default = "default_sketch_style")]
    pub sketch_style: String,

    #[serde(default = "default_replicate_api_url")]
    pub replicate_api_url: String,
    #[serde(default = "default_replicate_model_version")]
    pub replicate_model_version: String,
    #[serde(default = "default_replicate_poll_interval_millis")]
    pub replicate_poll_interval_millis: u64,
    #[serde(default = "default_replicate_max_wait_secs")]
    pub replicate_max_wait_secs: u64,

    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,
    #[serde(default = "default_openai_image_model")]
    pub openai_image_model: String,
    #[serde(default = "default_openai_image_size")]
    pub openai_image_size: String,
    #[serde(default = "default_openai_chat_model")]
    pub openai_chat_model: String,

    // generation parameters, passed through to the provider untouched
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f32,
    #[serde(default = "default_num_inference_steps")]
    pub num_inference_steps: u16,
    #[serde(default = "default_adapter_conditioning_scale")]
    pub adapter_conditioning_scale: f32,
    pub strength: Option<f32>,
    pub seed: Option<u64>,

    #[serde(default = "default_backstory_max_tokens")]
    pub backstory_max_tokens: u32,
    #[serde(default = "default_backstory_temperature")]
    pub backstory_temperature: f32,

    #[serde(default = "default_grayscale_sketches")]
    pub grayscale_sketches: bool,
    #[serde(default = "default_grayscale_fetch_timeout_secs")]
    pub grayscale_fetch_timeout_secs: u64,
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Envy {
    /// Names of the provider credentials the configured pairing needs but
    /// does not have.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        let replicate = self.image_provider.trim().eq_ignore_ascii_case("replicate");
        if replicate && is_blank(&self.replicate_api_key) {
            missing.push("REPLICATE_API_KEY");
        }
        if is_blank(&self.openai_api_key) {
            missing.push("OPENAI_API_KEY");
        }

        missing
    }
}

pub fn credential(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_blank(value: &Option<String>) -> bool {
    credential(value).is_none()
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_image_provider() -> String {
    "replicate".to_string()
}

fn default_sketch_style() -> String {
    "police_composite".to_string()
}

fn default_replicate_api_url() -> String {
    "https://api.replicate.com/v1".to_string()
}

fn default_replicate_model_version() -> String {
    ReplicateModelVersion::T2I_ADAPTER_SDXL_SKETCH.to_string()
}

fn default_replicate_poll_interval_millis() -> u64 {
    1000
}

fn default_replicate_max_wait_secs() -> u64 {
    600
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_image_model() -> String {
    "gpt-image-1".to_string()
}

fn default_openai_image_size() -> String {
    "1024x1024".to_string()
}

fn default_openai_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_guidance_scale() -> f32 {
    6.0
}

fn default_num_inference_steps() -> u16 {
    20
}

fn default_adapter_conditioning_scale() -> f32 {
    0.9
}

fn default_backstory_max_tokens() -> u32 {
    200
}

fn default_backstory_temperature() -> f32 {
    0.9
}

fn default_grayscale_sketches() -> bool {
    true
}

fn default_grayscale_fetch_timeout_secs() -> u64 {
    30
}

fn default_provider_timeout_secs() -> u64 {
    120
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

#[cfg(test)]
pub fn test_envy(vars: &[(&str, &str)]) -> Envy {
    envy::from_iter(
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .expect("test environment should deserialize")
}
