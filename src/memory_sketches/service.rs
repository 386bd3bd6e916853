use std::time::Duration;

use crate::AppState;

use super::{
    enums::sketch_style::SketchStyle,
    errors::SketchApiError,
    models::{
        image_payload::ImagePayload, memory_sketch::MemorySketch,
        sketch_reference::SketchReference,
    },
    util::grayscale,
};

/// Runs both generators concurrently. Either failing fails the whole sketch.
pub async fn create_memory_sketch(
    image: &ImagePayload,
    style: SketchStyle,
    state: &AppState,
) -> Result<MemorySketch, SketchApiError> {
    let sketch = generate_normalized_sketch(image, style, state);
    let backstory = state.storyteller.generate_backstory(image);

    let (sketch_url, backstory) = futures::future::try_join(sketch, backstory).await?;

    Ok(MemorySketch {
        sketch_url,
        backstory,
        mode: [state.sketcher.mode(), "+", state.storyteller.mode()].concat(),
    })
}

async fn generate_normalized_sketch(
    image: &ImagePayload,
    style: SketchStyle,
    state: &AppState,
) -> Result<SketchReference, SketchApiError> {
    let reference = state.sketcher.generate_sketch(image, style).await?;

    if !state.envy.grayscale_sketches {
        return Ok(reference);
    }

    let timeout = Duration::from_secs(state.envy.grayscale_fetch_timeout_secs);
    Ok(grayscale::normalize_to_grayscale(&state.http, reference, timeout).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;

    use super::create_memory_sketch;
    use crate::{
        app::{env::test_envy, util::data_url, util::test_server},
        memory_sketches::{
            enums::sketch_style::SketchStyle,
            errors::SketchApiError,
            generators::fakes::{FakeSketcher, FakeStoryteller},
            models::{image_payload::ImagePayload, sketch_reference::SketchReference},
        },
        AppState,
    };

    fn state(
        sketcher: Arc<FakeSketcher>,
        storyteller: Arc<FakeStoryteller>,
        vars: &[(&str, &str)],
    ) -> AppState {
        AppState {
            envy: Arc::new(test_envy(vars)),
            http: reqwest::Client::new(),
            sketcher,
            storyteller,
        }
    }

    fn selfie() -> ImagePayload {
        ImagePayload::new(Bytes::from(test_server::rgb_jpeg(8, 8)), Some(&mime::IMAGE_JPEG))
    }

    #[tokio::test]
    async fn merges_both_results_with_mode_tag() {
        let sketcher = Arc::new(FakeSketcher::new(Ok(SketchReference::Url(
            "https://cdn.example/out.png".to_string(),
        ))));
        let storyteller = Arc::new(FakeStoryteller::new(Ok("A mime who lost his hat.".to_string())));
        let state = state(
            sketcher.clone(),
            storyteller.clone(),
            &[("GRAYSCALE_SKETCHES", "false")],
        );

        let sketch = create_memory_sketch(&selfie(), SketchStyle::PencilSketch, &state)
            .await
            .unwrap();

        assert_eq!(sketch.sketch_url.as_str(), "https://cdn.example/out.png");
        assert_eq!(sketch.backstory, "A mime who lost his hat.");
        assert_eq!(sketch.mode, "fake-sketch+fake-llm");
        assert_eq!(
            *sketcher.last_style.lock().unwrap(),
            Some(SketchStyle::PencilSketch)
        );
    }

    #[tokio::test]
    async fn inline_sketch_is_grayscaled_when_enabled() {
        let color = data_url::encode("image/png", &test_server::rgb_png(3, 3));
        let sketcher = Arc::new(FakeSketcher::new(Ok(SketchReference::DataUrl(color.clone()))));
        let storyteller = Arc::new(FakeStoryteller::new(Ok("story".to_string())));
        let state = state(sketcher, storyteller, &[]);

        let sketch = create_memory_sketch(&selfie(), SketchStyle::PoliceComposite, &state)
            .await
            .unwrap();

        let SketchReference::DataUrl(value) = &sketch.sketch_url else {
            panic!("expected data url");
        };
        assert_ne!(value, &color);
        let (_, bytes) = data_url::decode(value).unwrap();
        assert_eq!(
            image::load_from_memory(&bytes).unwrap().color(),
            image::ColorType::L8
        );
    }

    #[tokio::test]
    async fn backstory_failure_fails_the_whole_sketch() {
        let sketcher = Arc::new(FakeSketcher::new(Ok(SketchReference::Url(
            "https://cdn.example/out.png".to_string(),
        ))));
        let storyteller = Arc::new(FakeStoryteller::new(Err(SketchApiError::Upstream {
            provider: "llm",
            detail: "boom".to_string(),
        })));
        let state = state(
            sketcher.clone(),
            storyteller.clone(),
            &[("GRAYSCALE_SKETCHES", "false")],
        );

        let result = create_memory_sketch(&selfie(), SketchStyle::PoliceComposite, &state).await;

        assert_eq!(sketcher.calls(), 1);
        assert_eq!(storyteller.calls(), 1);
        assert_eq!(
            result.unwrap_err(),
            SketchApiError::Upstream {
                provider: "llm",
                detail: "boom".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn sketch_failure_is_propagated() {
        let sketcher = Arc::new(FakeSketcher::new(Err(SketchApiError::ModerationRejection)));
        let storyteller = Arc::new(FakeStoryteller::new(Ok("story".to_string())));
        let state = state(sketcher, storyteller, &[]);

        let result = create_memory_sketch(&selfie(), SketchStyle::PoliceComposite, &state).await;

        assert_eq!(result.unwrap_err(), SketchApiError::ModerationRejection);
    }
}
