//! Storage layer for role records
//!
//! The registry is the only writer; everything here is plain persistence
//! with per-record optimistic versioning.

mod memory;
mod role_store;

pub use memory::MemoryRoleStore;
pub use role_store::RoleStore;
