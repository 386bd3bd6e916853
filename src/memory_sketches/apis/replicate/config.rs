pub const PROVIDER: &str = "replicate";

#[non_exhaustive]
pub struct ReplicateModelVersion;

impl ReplicateModelVersion {
    // adirik/t2i-adapter-sdxl-sketch
    pub const T2I_ADAPTER_SDXL_SKETCH: &'static str =
        "3a14a915b013decb6ab672115c8bced7c088df86c2ddd0a89433717b9ec7d927";
}
