mod blog_handler;
pub mod form;

pub use blog_handler::*;
