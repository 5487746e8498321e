//! Declaration-source seam consumed at bootstrap.

use async_trait::async_trait;

use crate::declaration::record::SubscriptionDeclaration;
use crate::error::ConfigurationError;

/// Where subscription declarations come from.
///
/// Static configuration files and runtime registration calls both implement
/// this seam so every declaration funnels through the same validation and
/// compilation path. Fetching happens once, single-threaded, during startup;
/// the engine never calls back into a source afterwards.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    /// Returns all declarations known to this source, in declaration order.
    async fn fetch_declarations(&self) -> Result<Vec<SubscriptionDeclaration>, ConfigurationError>;
}
