//! Sink implementations

pub mod file;

pub use file::FileAppender;
