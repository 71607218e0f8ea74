//! Storage module for video and thumbnail objects
//!
//! Provides an S3 client behind the [`ObjectStore`] trait, the
//! [`ObjectRelocator`] that owns the bucket key layout (upload, move, delete)
//! and the orphan ledger that tracks objects left behind by partial failures.

mod object_store;
mod orphan_ledger;
mod relocator;
mod s3_client;

#[cfg(test)]
pub mod memory;

pub use object_store::ObjectStore;
pub use orphan_ledger::{OrphanLedger, OrphanedObject, PgOrphanLedger};
pub use relocator::{EntityKind, ObjectRelocator, UploadPayload};
pub use s3_client::S3Client;
