pub mod document;
pub mod post;
pub mod richtext;
pub mod utils;
