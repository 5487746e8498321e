//! Declaration bootstrap runtime integration helpers.

use lazy_static::lazy_static;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::task;

use crate::declaration::{SubscriptionDeclaration, SubscriptionSource};
use crate::error::ConfigurationError;

const THREAD_NUM: usize = 2;

lazy_static! {
    static ref BOOTSTRAP_RUNTIME: Runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(THREAD_NUM)
        .enable_all()
        .build()
        .expect("Unable to create bootstrap runtime");
}

/// Fetches all declarations from an async source within synchronous startup.
///
/// Callers run inside a multi-threaded runtime; the fetch is parked on a
/// dedicated bootstrap runtime so their workers stay unblocked.
pub(crate) fn fetch_declarations(
    source: Arc<dyn SubscriptionSource>,
) -> Result<Vec<SubscriptionDeclaration>, ConfigurationError> {
    task::block_in_place(|| BOOTSTRAP_RUNTIME.block_on(source.fetch_declarations()))
}
