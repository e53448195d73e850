//! Shared application state for the API service.

use agritrace_engine::{ExecutorConfig, TransitionExecutor};
use agritrace_ledger::{LedgerGateway, MemoryLedger};
use std::sync::Arc;

/// Handler state: a handle to the transition executor. Handlers carry no
/// business logic; everything routes through the executor.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<TransitionExecutor>,
}

impl AppState {
    /// State backed by a fresh in-memory ledger. Local development and tests.
    pub fn new() -> Self {
        Self::with_gateway(Arc::new(MemoryLedger::new()))
    }

    /// State over an arbitrary ledger gateway with default executor config.
    pub fn with_gateway(gateway: Arc<dyn LedgerGateway>) -> Self {
        Self {
            executor: Arc::new(TransitionExecutor::new(gateway, ExecutorConfig::default())),
        }
    }

    /// State over a pre-built executor.
    pub fn with_executor(executor: Arc<TransitionExecutor>) -> Self {
        Self { executor }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
