pub mod file_size;
pub mod format;
pub mod markdown;
