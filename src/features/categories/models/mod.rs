mod category;

pub use category::{Category, CategoryLink};
