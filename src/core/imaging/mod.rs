//! # Imaging Module
//!
//! Everything the splitter and detector need from an image codec:
//! load, save by extension, grayscale, crop and resize.

mod decode;
mod encode;
mod resize;
mod window;

pub use decode::Decoder;
pub use encode::save_new;
pub use resize::GrayResizer;
pub use window::{grayscale_window, ComparisonWindow};
