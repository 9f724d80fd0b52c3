mod blog;

pub use blog::{Blog, Media};
