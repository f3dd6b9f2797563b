//! Use case implementations.

mod load_image_use_case;

pub use load_image_use_case::{ImageLoadedEvent, LoadImageUseCase};
