//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod json_manifest_repository;
