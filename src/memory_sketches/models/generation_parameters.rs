use crate::app::env::Envy;

/// Tuning values handed to the image provider as-is. Ranges are the
/// provider's business, nothing here validates them.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    pub guidance_scale: f32,
    pub num_inference_steps: u16,
    /// Style strength, how closely the output follows the sketch adapter.
    pub adapter_conditioning_scale: f32,
    /// Denoising strength.
    pub strength: Option<f32>,
    pub seed: Option<u64>,
    pub size: String,
}

impl GenerationParameters {
    pub fn from_envy(envy: &Envy) -> Self {
        Self {
            guidance_scale: envy.guidance_scale,
            num_inference_steps: envy.num_inference_steps,
            adapter_conditioning_scale: envy.adapter_conditioning_scale,
            strength: envy.strength,
            seed: envy.seed,
            size: envy.openai_image_size.to_string(),
        }
    }
}
