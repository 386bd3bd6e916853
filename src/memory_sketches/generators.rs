use async_trait::async_trait;

use super::{
    enums::sketch_style::SketchStyle,
    errors::SketchApiError,
    models::{image_payload::ImagePayload, sketch_reference::SketchReference},
};

#[async_trait]
pub trait SketchGenerator: Send + Sync {
    /// Short tag for the provider, reported in the response `mode`.
    fn mode(&self) -> &'static str;

    async fn generate_sketch(
        &self,
        image: &ImagePayload,
        style: SketchStyle,
    ) -> Result<SketchReference, SketchApiError>;
}

#[async_trait]
pub trait BackstoryGenerator: Send + Sync {
    fn mode(&self) -> &'static str;

    async fn generate_backstory(&self, image: &ImagePayload) -> Result<String, SketchApiError>;
}

#[cfg(test)]
pub mod fakes {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;

    use super::{BackstoryGenerator, SketchGenerator};
    use crate::memory_sketches::{
        enums::sketch_style::SketchStyle,
        errors::SketchApiError,
        models::{image_payload::ImagePayload, sketch_reference::SketchReference},
    };

    pub struct FakeSketcher {
        pub result: Result<SketchReference, SketchApiError>,
        pub calls: AtomicUsize,
        pub last_style: Mutex<Option<SketchStyle>>,
    }

    impl FakeSketcher {
        pub fn new(result: Result<SketchReference, SketchApiError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
                last_style: Mutex::new(None),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SketchGenerator for FakeSketcher {
        fn mode(&self) -> &'static str {
            "fake-sketch"
        }

        async fn generate_sketch(
            &self,
            _image: &ImagePayload,
            style: SketchStyle,
        ) -> Result<SketchReference, SketchApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_style.lock().unwrap() = Some(style);
            self.result.clone()
        }
    }

    pub struct FakeStoryteller {
        pub result: Result<String, SketchApiError>,
        pub calls: AtomicUsize,
    }

    impl FakeStoryteller {
        pub fn new(result: Result<String, SketchApiError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BackstoryGenerator for FakeStoryteller {
        fn mode(&self) -> &'static str {
            "fake-llm"
        }

        async fn generate_backstory(&self, _image: &ImagePayload) -> Result<String, SketchApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }
}
