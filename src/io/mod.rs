pub mod fs;

pub use fs::{load_document, store_document};
