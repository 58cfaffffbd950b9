mod simplify_tests;

use crate::config::Config;
use crate::core::services::LedgerService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type TestService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

pub fn create_test_service() -> TestService {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    LedgerService::with_config(storage, logging, cache, Config::default())
}

pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
