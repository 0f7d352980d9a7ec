//! Side-effect hooks the registry calls around lifecycle operations.

use async_trait::async_trait;

use crate::types::PluginManifest;

/// Cache invalidation after mutating operations.
///
/// Failures here are logged and never propagated — a stale cache is
/// tolerable, a failed lifecycle operation is not.
pub trait CacheInvalidator: Send + Sync {
    fn invalidate_config_cache(&self) -> anyhow::Result<()>;
    fn invalidate_route_cache(&self) -> anyhow::Result<()>;
    fn invalidate_view_cache(&self) -> anyhow::Result<()>;
}

/// Default invalidator for setups without external caches.
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate_config_cache(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn invalidate_route_cache(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn invalidate_view_cache(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Dependent-system refresh run during install (e.g. regenerating the
/// loader index over registered plugin paths). Failure is fatal to the
/// install operation.
#[async_trait]
pub trait DependentReload: Send + Sync {
    async fn reload(&self) -> anyhow::Result<()>;
}

/// Plugin-provided setup step run during install (e.g. the plugin's own
/// schema migrations). Failure is fatal to the install operation.
#[async_trait]
pub trait PluginSetup: Send + Sync {
    async fn run(&self, manifest: &PluginManifest) -> anyhow::Result<()>;
}

/// Fire the given invalidations, logging failures without propagating them.
pub(crate) fn invalidate(invalidator: &dyn CacheInvalidator, include_views: bool) {
    if let Err(e) = invalidator.invalidate_config_cache() {
        tracing::warn!(%e, "config cache invalidation failed");
    }
    if let Err(e) = invalidator.invalidate_route_cache() {
        tracing::warn!(%e, "route cache invalidation failed");
    }
    if include_views
        && let Err(e) = invalidator.invalidate_view_cache()
    {
        tracing::warn!(%e, "view cache invalidation failed");
    }
}
