use ndarray::Array3;

/// The two model inputs derived from one decoded image, both CHW.
#[derive(Debug, Clone)]
pub struct ImageTensors {
    /// Primary visual input, passed as `image`.
    pub image: Array3<f32>,
    /// Tag recognition input, passed as `ram_image` / `ram_img`.
    pub ram_image: Array3<f32>,
}
