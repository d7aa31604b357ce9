//! Reelstore Storage Library
//!
//! This crate provides the storage abstraction for video bytes and its local
//! filesystem implementation.
//!
//! # Path layout
//!
//! Every video lives directly under the configured storage root, named after its
//! sanitized original upload filename: `{root}/{filename}`. Two uploads with the same
//! filename share a path, and the later write replaces the earlier bytes.
//!
//! Filenames never contain path separators, `..` segments or absolute prefixes once
//! sanitized, so a resolved path always stays inside the root. Sanitization lives in the
//! `keys` module so every backend applies the same rules.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::sanitize_filename;
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult, UploadReader};
