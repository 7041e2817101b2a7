//! Shared DTOs between the explorer backend and its clients.

pub mod shared;
pub mod usecases;
