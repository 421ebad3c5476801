/// Application context: owns the cache, its sweeper, the dispatcher and,
/// in mock mode, the embedded backend
use crate::apis::{ReqwestTransport, RequestDescriptor, RequestDispatcher};
use crate::cache::{CacheConfig, CacheStore};
use crate::config::Config;
use crate::errors::RequestError;
use crate::logger::{self, LogTag};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

#[cfg(feature = "web")]
use crate::webserver::ServerHandle;

pub struct AppContext {
    pub config: Config,
    pub cache: Arc<CacheStore<Value>>,
    pub dispatcher: RequestDispatcher,
    shutdown: Arc<Notify>,
    sweeper: Option<JoinHandle<()>>,
    #[cfg(feature = "web")]
    backend: Option<ServerHandle>,
}

fn log_request_error(request: &RequestDescriptor, error: &RequestError) {
    logger::error(
        LogTag::Request,
        &format!(
            "{} {} -> {} ({})",
            request.method,
            request.path,
            error.code(),
            error.user_message()
        ),
    );
}

impl AppContext {
    /// Build the request stack from `config`
    ///
    /// With `api.mock = true` an embedded backend is started on an ephemeral
    /// port and the dispatcher is pointed at it.
    pub async fn start(config: Config) -> Result<Self, String> {
        let cache = Arc::new(CacheStore::new(CacheConfig::from_settings(&config.cache)));
        let shutdown = Arc::new(Notify::new());

        let sweeper = if config.cache.enable && config.cache.sweep_interval_ms > 0 {
            Some(cache.spawn_sweeper(
                Duration::from_millis(config.cache.sweep_interval_ms),
                Arc::clone(&shutdown),
            ))
        } else {
            None
        };

        let transport = Arc::new(ReqwestTransport::new(config.api.timeout())?);
        let dispatcher =
            RequestDispatcher::new(transport, Arc::clone(&cache), &config.api, &config.retry)
                .with_error_callback(Arc::new(log_request_error));

        #[cfg(feature = "web")]
        let (dispatcher, backend) = if config.api.mock {
            let mut embedded = config.webserver.clone();
            embedded.port = 0;
            let handle =
                crate::webserver::start_server(&embedded, &config.api, &config.pagination).await?;
            (dispatcher.with_base_url(&handle.base_url()), Some(handle))
        } else {
            (dispatcher, None)
        };

        #[cfg(not(feature = "web"))]
        if config.api.mock {
            logger::warning(
                LogTag::System,
                "api.mock is set but the mock backend is not compiled in; using api.base_url",
            );
        }

        logger::debug(
            LogTag::System,
            &format!(
                "Context ready: base_url={} cache={} ttl={}ms max={}",
                dispatcher.base_url(),
                if config.cache.enable { "on" } else { "off" },
                config.cache.ttl_ms,
                config.cache.max_size
            ),
        );

        Ok(Self {
            config,
            cache,
            dispatcher,
            shutdown,
            sweeper,
            #[cfg(feature = "web")]
            backend,
        })
    }

    /// Stop the sweeper and the embedded backend
    pub async fn shutdown(self) {
        self.shutdown.notify_one();
        if let Some(sweeper) = self.sweeper {
            if let Err(e) = sweeper.await {
                logger::warning(LogTag::Cache, &format!("Sweeper task ended abnormally: {}", e));
            }
        }

        #[cfg(feature = "web")]
        if let Some(backend) = self.backend {
            if let Err(e) = backend.stop().await {
                logger::warning(LogTag::Webserver, &e);
            }
        }

        let metrics = self.cache.metrics();
        logger::debug(
            LogTag::Cache,
            &format!(
                "Cache at shutdown: {} entries, hit rate {:.0}%, {} evictions, {} expirations",
                self.cache.len(),
                metrics.hit_rate() * 100.0,
                metrics.evictions,
                metrics.expirations
            ),
        );
    }
}
