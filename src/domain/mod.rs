pub mod article;

pub use article::{create_id, Article, Author, Media};
