pub mod resolver;
pub mod sanitizer;
