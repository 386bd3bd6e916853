use std::{io::Cursor, net::TcpListener};

use axum::Router;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Reserves a local port so handlers can refer to their own base url.
pub fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    (listener, base_url)
}

pub fn serve(listener: TcpListener, router: Router) {
    let server = axum::Server::from_tcp(listener)
        .expect("test server from listener")
        .serve(router.into_make_service());

    tokio::spawn(async move {
        let _ = server.await;
    });
}

pub fn spawn(router: Router) -> String {
    let (listener, base_url) = bind();
    serve(listener, router);
    base_url
}

/// A base url nothing is listening on.
pub fn unreachable_url() -> String {
    let (listener, base_url) = bind();
    drop(listener);
    base_url
}

pub fn rgb_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 20) as u8, (y * 20) as u8, 180])
    }))
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).expect("encode fixture");
    out.into_inner()
}

pub fn rgb_png(width: u32, height: u32) -> Vec<u8> {
    encode(&rgb_image(width, height), ImageFormat::Png)
}

pub fn rgb_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(&rgb_image(width, height), ImageFormat::Jpeg)
}
