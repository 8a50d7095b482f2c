//! Smooth viewport scrolling for the terminal host.

pub mod animator;
pub mod easing;

pub use animator::ViewportAnimator;
