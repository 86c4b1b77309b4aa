pub mod frame;
pub mod view;

pub use frame::{compose, Caption, FrameBuffer, StyledGlyph};
pub use view::SceneView;
