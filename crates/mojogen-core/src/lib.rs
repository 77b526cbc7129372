pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod plan;
pub mod sidecar;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use fetch::{ensure_file, EnsureOutcome, FetchTarget};
pub use generator::{GenerateJob, Generator};
pub use store::{ContentAddress, HttpObjectStore, ObjectStore};
