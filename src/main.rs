use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::{
    app::env::Envy,
    memory_sketches::{
        apis::{
            openai::{chat_service::OpenAiBackstoryWriter, edit_service::OpenAiEditSketcher},
            replicate::service::ReplicateSketcher,
        },
        enums::{image_provider::ImageProvider, sketch_style::SketchStyle},
        generators::{BackstoryGenerator, SketchGenerator},
    },
};

mod app;
mod memory_sketches;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub http: reqwest::Client,
    pub sketcher: Arc<dyn SketchGenerator>,
    pub storyteller: Arc<dyn BackstoryGenerator>,
}

impl AppState {
    pub fn from_envy(envy: Envy) -> Result<Self, String> {
        let provider = envy.image_provider.parse::<ImageProvider>()?;
        envy.sketch_style
            .parse::<SketchStyle>()
            .map_err(|e| e.to_string())?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(envy.provider_timeout_secs))
            .build()
            .map_err(|e| e.to_string())?;

        let sketcher: Arc<dyn SketchGenerator> = match provider {
            ImageProvider::Replicate => {
                Arc::new(ReplicateSketcher::from_envy(http.clone(), &envy))
            }
            ImageProvider::OpenAiEdit => {
                Arc::new(OpenAiEditSketcher::from_envy(http.clone(), &envy))
            }
        };
        let storyteller = Arc::new(OpenAiBackstoryWriter::from_envy(http.clone(), &envy));

        Ok(Self {
            envy: Arc::new(envy),
            http,
            sketcher,
            storyteller,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/health", get(app::controller::get_health))
        .route(
            "/memory-sketch",
            post(memory_sketches::controller::create_memory_sketch),
        )
        .fallback(app::controller::fallback)
        .layer(DefaultBodyLimit::max(state.envy.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let _ = dotenvy::dotenv();

    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("memory_sketch_api=debug,tower_http=info")),
        )
        .init();

    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    tracing::info!("starting in {} environment", envy.app_env);
    for name in envy.missing_credentials() {
        tracing::warn!("{} is not set, memory sketches will fail until it is", name);
    }

    // properties
    let port = envy.port.unwrap_or(8001);
    let state = match AppState::from_envy(envy) {
        Ok(state) => state,
        Err(e) => panic!("invalid configuration: {}", e),
    };
    tracing::info!(
        "image provider {}, backstory provider {}",
        state.sketcher.mode(),
        state.storyteller.mode()
    );

    // app
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server failed");
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::app::env::test_envy;

    #[test]
    fn provider_pairing_follows_configuration() {
        let state = AppState::from_envy(test_envy(&[])).unwrap();
        assert_eq!(state.sketcher.mode(), "replicate");
        assert_eq!(state.storyteller.mode(), "llm");

        let state = AppState::from_envy(test_envy(&[("IMAGE_PROVIDER", "openai")])).unwrap();
        assert_eq!(state.sketcher.mode(), "openai-edit");
    }

    #[test]
    fn unknown_provider_or_style_is_a_startup_error() {
        assert!(AppState::from_envy(test_envy(&[("IMAGE_PROVIDER", "dalle-9")])).is_err());
        assert!(AppState::from_envy(test_envy(&[("SKETCH_STYLE", "oil_painting")])).is_err());
    }
}
