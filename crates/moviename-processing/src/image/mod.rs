//! Still-image helpers: JPEG encoding and the animated-image fallback.

mod animated;
mod encode;

pub use animated::AnimatedImageSampler;
pub use encode::encode_jpeg;
