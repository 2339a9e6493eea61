//! Image storage module.
//!
//! Images live as `<id>.<extension>` files in one flat directory. There is no
//! index: lookups scan the directory, so files placed there by hand are served
//! the same way as uploaded ones.

mod id;
mod storage;

pub use id::ImageId;
pub use storage::{split_extension, ImageStorage, StoredImage};
