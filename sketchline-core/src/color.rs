/// A solid RGB stroke color, channels nominally in `[0, 1]`.
///
/// Stored exactly as it appears in a document, three `f32` in `r, g, b` order.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct Color([f32; 3]);
impl Color {
    pub const BLACK: Self = Self([0.0; 3]);
    pub const WHITE: Self = Self([1.0; 3]);
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }
    #[must_use]
    pub const fn from_array(rgb: [f32; 3]) -> Self {
        Self(rgb)
    }
    #[must_use]
    pub const fn as_array(&self) -> [f32; 3] {
        self.0
    }
    #[must_use]
    pub fn r(&self) -> f32 {
        self.0[0]
    }
    #[must_use]
    pub fn g(&self) -> f32 {
        self.0[1]
    }
    #[must_use]
    pub fn b(&self) -> f32 {
        self.0[2]
    }
}
// Strokes are black unless told otherwise.
impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
impl From<[f32; 3]> for Color {
    fn from(value: [f32; 3]) -> Self {
        Self::from_array(value)
    }
}
impl From<Color> for [f32; 3] {
    fn from(value: Color) -> Self {
        value.as_array()
    }
}
