//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the object storage client and the relocation logic built on it.

pub mod storage;
