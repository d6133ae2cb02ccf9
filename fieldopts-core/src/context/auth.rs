use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The caller's credential/session handle. The engine never looks inside it.
#[derive(Clone, Default)]
pub struct AuthContext(Option<Arc<dyn Any + Send + Sync>>);

impl AuthContext {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    /// Borrows the handle as the connector's concrete credential type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|v| v.downcast_ref::<T>())
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("AuthContext(<opaque>)"),
            None => f.write_str("AuthContext(none)"),
        }
    }
}
