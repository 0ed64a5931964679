use futures::future::{BoxFuture, FutureExt, Shared};
use once_cell::sync::{Lazy, OnceCell};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Something that can open a connection to a database.
///
/// The returned future must own everything it needs (`'static`) so a single
/// attempt can be shared by every caller of [`ConnectionManager::client`].
pub trait Connect: Send + Sync + 'static {
    /// Cheap-to-clone handle to the live connection
    type Handle: Clone + Send + Sync + 'static;
    /// Error produced by a failed attempt; cloned to every waiting caller
    type Error: Clone + Send + Sync + 'static;

    /// Key identifying the target, used by the process-wide reload registry
    fn cache_key(&self) -> String;

    /// Start one connection attempt
    fn connect(&self) -> BoxFuture<'static, Result<Self::Handle, Self::Error>>;
}

type PendingConnection<C> =
    Shared<BoxFuture<'static, Result<<C as Connect>::Handle, <C as Connect>::Error>>>;

type RegistryKey = (TypeId, String);

/// In-flight or completed connections that outlive the managers that started
/// them. Only managers built with `reuse_across_reloads = true` touch it.
static RELOAD_REGISTRY: Lazy<Mutex<HashMap<RegistryKey, Box<dyn Any + Send + Sync>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Lazily-established, shared database connection.
///
/// The first call to [`client`](Self::client) starts exactly one connection
/// attempt. Every later call, including calls racing the first one, awaits
/// that same attempt. A failed attempt is not retried: all callers observe
/// the same error.
///
/// With `reuse_across_reloads` the attempt is also published to a
/// process-wide registry keyed by [`Connect::cache_key`], so a manager built
/// again for the same target (after the code that owned the first one was
/// rebuilt during development) picks up the existing connection instead of
/// opening another.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::{MongoConfig, MongoConnectionManager};
///
/// let manager = MongoConnectionManager::from_config(MongoConfig::new(uri), false);
/// let client = manager.client().await?;
/// ```
pub struct ConnectionManager<C: Connect> {
    connector: C,
    reuse_across_reloads: bool,
    pending: OnceCell<PendingConnection<C>>,
}

impl<C: Connect> ConnectionManager<C> {
    pub fn new(connector: C, reuse_across_reloads: bool) -> Self {
        Self {
            connector,
            reuse_across_reloads,
            pending: OnceCell::new(),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn reuses_across_reloads(&self) -> bool {
        self.reuse_across_reloads
    }

    /// Whether a connection attempt has been started by (or handed to) this manager
    pub fn is_started(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Resolve to the shared connection handle, starting the attempt on first use
    pub async fn client(&self) -> Result<C::Handle, C::Error> {
        let pending = self.pending.get_or_init(|| self.start()).clone();
        pending.await
    }

    fn start(&self) -> PendingConnection<C> {
        if !self.reuse_across_reloads {
            return self.begin();
        }

        let key = (TypeId::of::<C>(), self.connector.cache_key());
        let mut registry = RELOAD_REGISTRY
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = registry
            .get(&key)
            .and_then(|entry| entry.downcast_ref::<PendingConnection<C>>())
        {
            debug!("Reusing connection from the process-wide registry");
            return existing.clone();
        }

        let pending = self.begin();
        registry.insert(key, Box::new(pending.clone()));
        pending
    }

    fn begin(&self) -> PendingConnection<C> {
        info!(
            reuse_across_reloads = self.reuse_across_reloads,
            "Starting database connection attempt"
        );
        self.connector.connect().shared()
    }
}
