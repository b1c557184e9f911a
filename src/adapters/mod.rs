//! Adapters implementing domain ports.
//!
//! Concrete storage backends for the [`crate::ports::AgentRepository`] port.
//! Following hexagonal architecture, adapters depend on domain ports, not
//! the other way around.

pub mod json_repository;
pub mod msgpack_repository;

pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;
