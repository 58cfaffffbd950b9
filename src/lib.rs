pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::LedgerError;
pub use crate::core::services::LedgerService;
pub use crate::core::simplify::simplify_debts;
pub use crate::infrastructure::{
    cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
};

#[cfg(test)]
mod tests;
