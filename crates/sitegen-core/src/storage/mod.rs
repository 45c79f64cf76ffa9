//! Storage layer
//!
//! Projects are kept in a single JSON document on disk.

pub mod json_file;

pub use json_file::JsonFileProjectRepository;
