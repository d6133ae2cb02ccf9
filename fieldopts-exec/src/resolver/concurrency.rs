use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use fieldopts_core::ProviderError;

/// A global cap on provider calls plus optional caps per provider name.
pub struct ConcurrencyLimits {
    global: Arc<Semaphore>,
    per_provider: Arc<HashMap<String, Arc<Semaphore>>>,
}

impl ConcurrencyLimits {
    pub fn new(global_limit: usize, per_provider_limits: &BTreeMap<String, usize>) -> Self {
        Self {
            global: Arc::new(Semaphore::new(global_limit.max(1))),
            per_provider: Arc::new(
                per_provider_limits
                    .iter()
                    .map(|(k, v)| (k.clone(), Arc::new(Semaphore::new((*v).max(1)))))
                    .collect(),
            ),
        }
    }

    /// The provider permit is taken before the global one so a saturated provider
    /// does not hold global slots while it waits.
    pub async fn acquire(
        &self,
        provider_name: Option<&str>,
    ) -> Result<ConcurrencyPermit, ProviderError> {
        let provider = match provider_name.and_then(|name| self.per_provider.get(name)) {
            Some(sem) => Some(sem.clone().acquire_owned().await.map_err(closed)?),
            None => None,
        };
        let global = self.global.clone().acquire_owned().await.map_err(closed)?;
        Ok(ConcurrencyPermit {
            _global: global,
            _provider: provider,
        })
    }
}

fn closed(_: tokio::sync::AcquireError) -> ProviderError {
    ProviderError::other("concurrency limiter closed")
}

pub struct ConcurrencyPermit {
    _global: OwnedSemaphorePermit,
    _provider: Option<OwnedSemaphorePermit>,
}
