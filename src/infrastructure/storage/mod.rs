//! In-memory repository implementations

mod memory;

pub use memory::{
    InMemoryParcelRepository, InMemoryRepositoryProvider, InMemoryRoleRepository,
    InMemoryUserRepository,
};
