use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub version: String,
    pub input: InputSpecSketchAdapter,
}

#[derive(Debug, Serialize)]
pub struct InputSpecSketchAdapter {
    pub image: String,
    pub prompt: String,
    pub negative_prompt: String,
    pub num_inference_steps: u16,
    pub guidance_scale: f32,
    pub adapter_conditioning_scale: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}
