pub mod generation_parameters;
pub mod image_payload;
pub mod memory_sketch;
pub mod sketch_reference;
