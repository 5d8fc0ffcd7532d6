pub mod article;
pub mod date;
pub mod text;

pub use article::FieldExtractor;
