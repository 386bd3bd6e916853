use std::{io::Cursor, time::Duration};

use image::{DynamicImage, ImageFormat};

use crate::{
    app::util::{data_url, fetch},
    memory_sketches::models::sketch_reference::SketchReference,
};

/// Forces a sketch to a single luminance channel and inlines it as a PNG
/// data url. Best effort: on any failure the reference comes back untouched.
pub async fn normalize_to_grayscale(
    client: &reqwest::Client,
    reference: SketchReference,
    timeout: Duration,
) -> SketchReference {
    match try_normalize(client, &reference, timeout).await {
        Ok(normalized) => normalized,
        Err(e) => {
            tracing::warn!("grayscale normalization skipped: {}", e);
            reference
        }
    }
}

async fn try_normalize(
    client: &reqwest::Client,
    reference: &SketchReference,
    timeout: Duration,
) -> Result<SketchReference, String> {
    let bytes = match reference {
        SketchReference::Url(url) => fetch::get_bytes(client, url, timeout)
            .await
            .map_err(|e| e.message)?
            .to_vec(),
        SketchReference::DataUrl(value) => match data_url::decode(value) {
            Some((_, bytes)) => bytes,
            None => return Err("data url is not base64 encoded".to_string()),
        },
    };

    let png = to_grayscale_png(&bytes).map_err(|e| e.to_string())?;

    Ok(SketchReference::DataUrl(data_url::encode(
        mime::IMAGE_PNG.essence_str(),
        &png,
    )))
}

pub fn to_grayscale_png(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let luma = match decoded {
        DynamicImage::ImageLuma8(_) => decoded,
        other => DynamicImage::ImageLuma8(other.to_luma8()),
    };

    let mut out = Cursor::new(Vec::new());
    luma.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{http::header, routing::get, Router};
    use image::ColorType;

    use super::normalize_to_grayscale;
    use crate::{
        app::util::{data_url, test_server},
        memory_sketches::models::sketch_reference::SketchReference,
    };

    fn decode_png(reference: &SketchReference) -> image::DynamicImage {
        let SketchReference::DataUrl(value) = reference else {
            panic!("expected a data url, got {:?}", reference);
        };
        assert!(value.starts_with("data:image/png;base64,"));
        let (_, bytes) = data_url::decode(value).expect("valid data url");
        image::load_from_memory(&bytes).expect("valid png")
    }

    #[tokio::test]
    async fn fetched_color_image_becomes_single_channel_data_url() {
        let png = test_server::rgb_png(10, 10);
        let base_url = test_server::spawn(Router::new().route(
            "/out.png",
            get(move || async move { ([(header::CONTENT_TYPE, "image/png")], png) }),
        ));

        let reference = SketchReference::Url(format!("{}/out.png", base_url));
        let normalized =
            normalize_to_grayscale(&reqwest::Client::new(), reference, Duration::from_secs(5)).await;

        let decoded = decode_png(&normalized);
        assert_eq!((decoded.width(), decoded.height()), (10, 10));
        assert_eq!(decoded.color(), ColorType::L8);
    }

    #[tokio::test]
    async fn inline_color_image_is_converted_without_network() {
        let reference = SketchReference::DataUrl(data_url::encode(
            "image/jpeg",
            &test_server::rgb_jpeg(6, 4),
        ));
        let normalized =
            normalize_to_grayscale(&reqwest::Client::new(), reference, Duration::from_secs(1)).await;

        let rgb = decode_png(&normalized).to_rgb8();
        assert_eq!(rgb.dimensions(), (6, 4));
        assert!(rgb.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[tokio::test]
    async fn failed_fetch_returns_original_reference() {
        let reference = SketchReference::Url(format!("{}/out.png", test_server::unreachable_url()));
        let normalized = normalize_to_grayscale(
            &reqwest::Client::new(),
            reference.clone(),
            Duration::from_secs(1),
        )
        .await;

        assert_eq!(normalized, reference);
    }

    #[tokio::test]
    async fn error_status_and_undecodable_bodies_return_original_reference() {
        let base_url = test_server::spawn(
            Router::new()
                .route(
                    "/missing.png",
                    get(|| async { (axum::http::StatusCode::NOT_FOUND, "gone") }),
                )
                .route("/garbage.png", get(|| async { "definitely not a png" })),
        );
        let client = reqwest::Client::new();

        for path in ["missing.png", "garbage.png"] {
            let reference = SketchReference::Url(format!("{}/{}", base_url, path));
            let normalized =
                normalize_to_grayscale(&client, reference.clone(), Duration::from_secs(5)).await;
            assert_eq!(normalized, reference);
        }
    }
}
