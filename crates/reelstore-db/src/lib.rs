//! Reelstore metadata index
//!
//! Durable mapping from video id to its metadata record, backed by SQLite.

pub mod db;

pub use db::{VideoRepository, VideoRepositoryTrait};
