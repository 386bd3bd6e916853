pub mod image_provider;
pub mod sketch_style;
