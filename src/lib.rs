//! cloudkeep backs up and synchronizes local filesystem paths to object
//! storage, mirroring local directory structure under a configured bucket.

pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
