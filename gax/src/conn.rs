use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use http::header::AUTHORIZATION;
use http::{HeaderValue, Request};
use tokio::sync::{Mutex, RwLock};
use tonic::body::Body;
use tonic::transport::{Channel as TonicChannel, ClientTlsConfig, Endpoint};
use tonic::{Code, Status};
use tower::filter::{AsyncFilter, AsyncFilterLayer, AsyncPredicate};
use tower::util::Either;
use tower::{BoxError, ServiceBuilder};

/// Opaque credential source handed to the transport layer. The library never
/// inspects tokens itself; it only attaches whatever this trait returns as a
/// bearer `authorization` header on every request.
pub trait TokenProvider: Send + Sync + Debug {
    fn token(&self) -> Pin<Box<dyn Future<Output = Result<String, BoxError>> + Send + '_>>;
}

pub type Channel = Either<AsyncFilter<TonicChannel, AsyncAuthInterceptor>, TonicChannel>;

#[derive(Clone, Debug)]
pub struct AsyncAuthInterceptor {
    token_provider: Arc<dyn TokenProvider>,
}

impl AsyncAuthInterceptor {
    fn new(token_provider: Arc<dyn TokenProvider>) -> Self {
        Self { token_provider }
    }
}

impl AsyncPredicate<Request<Body>> for AsyncAuthInterceptor {
    type Future = Pin<Box<dyn Future<Output = Result<Self::Request, BoxError>> + Send>>;
    type Request = Request<Body>;

    fn check(&mut self, request: Request<Body>) -> Self::Future {
        let tp = self.token_provider.clone();
        Box::pin(async move {
            let token = tp
                .token()
                .await
                .map_err(|e| Status::new(Code::Unauthenticated, format!("token error: {e:?}")))?;
            let token_header = HeaderValue::from_str(token.as_str())
                .map_err(|e| Status::new(Code::Unauthenticated, format!("token error: {e:?}")))?;
            let (mut parts, body) = request.into_parts();
            parts.headers.insert(AUTHORIZATION, token_header);
            Ok(Request::from_parts(parts, body))
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("tonic error : {0}")]
    TonicTransport(#[from] tonic::transport::Error),

    #[error("invalid emulator host: {0}")]
    InvalidEmulatorHost(String),
}

/// Where the channel pool connects to: the real backend, authenticated with
/// a [`TokenProvider`], or a local emulator reachable over plain HTTP.
#[derive(Clone)]
pub enum Environment {
    Emulator(String),
    Backend(Arc<dyn TokenProvider>),
}

impl Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Emulator(host) => write!(f, "Environment::Emulator({host})"),
            Environment::Backend(_) => write!(f, "Environment::Backend(..)"),
        }
    }
}

#[derive(Debug)]
struct AtomicRing<T>
where
    T: Clone + Debug,
{
    index: AtomicUsize,
    values: Vec<T>,
}

impl<T> AtomicRing<T>
where
    T: Clone + Debug,
{
    fn next(&self) -> T {
        let current = self.index.fetch_add(1, Ordering::SeqCst);
        //clone() reuses the underlying http/2 connection
        self.values[current % self.values.len()].clone()
    }
}

/// Pass-through transport tuning, e.g. buffer sizes and keepalive, supplied
/// by the caller and never interpreted by this library.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub keep_alive_interval: Option<Duration>,
}

impl ConnectionOptions {
    fn apply(&self, mut endpoint: Endpoint) -> Endpoint {
        if let Some(t) = self.timeout {
            endpoint = endpoint.timeout(t);
        }
        if let Some(t) = self.connect_timeout {
            endpoint = endpoint.connect_timeout(t);
        }
        if let Some(t) = self.keep_alive_interval {
            endpoint = endpoint.keep_alive_timeout(t);
        }
        endpoint
    }
}

struct Pool {
    ring: AtomicRing<Channel>,
}

impl Pool {
    async fn build(
        pool_size: usize,
        endpoint_uri: &str,
        domain_name: &str,
        environment: &Environment,
        conn_options: &ConnectionOptions,
    ) -> Result<Pool, Error> {
        let conns = match environment {
            Environment::Backend(token_provider) => {
                Self::create_connections(pool_size, endpoint_uri, domain_name, token_provider, conn_options).await?
            }
            Environment::Emulator(host) => Self::create_emulator_connections(host, conn_options).await?,
        };
        Ok(Pool {
            ring: AtomicRing { index: AtomicUsize::new(0), values: conns },
        })
    }

    async fn create_connections(
        pool_size: usize,
        endpoint_uri: &str,
        domain_name: &str,
        token_provider: &Arc<dyn TokenProvider>,
        conn_options: &ConnectionOptions,
    ) -> Result<Vec<Channel>, Error> {
        let tls_config = ClientTlsConfig::new().with_webpki_roots().domain_name(domain_name);
        let mut conns = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let endpoint = TonicChannel::from_shared(endpoint_uri.to_string())
                .map_err(|_| Error::InvalidEmulatorHost(endpoint_uri.to_string()))?
                .tls_config(tls_config.clone())?;
            let endpoint = conn_options.apply(endpoint);
            let con = Self::connect(endpoint).await?;
            let auth_layer = Some(AsyncFilterLayer::new(AsyncAuthInterceptor::new(Arc::clone(token_provider))));
            conns.push(ServiceBuilder::new().option_layer(auth_layer).service(con));
        }
        Ok(conns)
    }

    async fn create_emulator_connections(host: &str, conn_options: &ConnectionOptions) -> Result<Vec<Channel>, Error> {
        let endpoint = TonicChannel::from_shared(format!("http://{host}").into_bytes())
            .map_err(|_| Error::InvalidEmulatorHost(host.to_string()))?;
        let endpoint = conn_options.apply(endpoint);
        let con = Self::connect(endpoint).await?;
        Ok(vec![ServiceBuilder::new()
            .option_layer::<AsyncFilterLayer<AsyncAuthInterceptor>>(None)
            .service(con)])
    }

    async fn connect(endpoint: Endpoint) -> Result<TonicChannel, tonic::transport::Error> {
        let channel = endpoint.connect().await?;
        tracing::debug!("gRPC connection created");
        Ok(channel)
    }
}

/// Maintains N long-lived transport channels to a single endpoint and hands
/// out stub handles round-robin.
///
/// The pool is built lazily on first use: construction is cheap, and the
/// blocking socket setup happens outside any lock so a slow connect never
/// stalls unrelated callers. Only the handoff index and the `Option` slot
/// holding the pool are ever guarded.
pub struct ConnectionManager {
    pool_size: usize,
    endpoint_uri: String,
    domain_name: String,
    environment: Environment,
    conn_options: ConnectionOptions,
    pool: RwLock<Option<Arc<Pool>>>,
    build_lock: Mutex<()>,
}

impl ConnectionManager {
    pub fn new(
        pool_size: usize,
        endpoint_uri: impl Into<String>,
        domain_name: impl Into<String>,
        environment: Environment,
        conn_options: ConnectionOptions,
    ) -> Self {
        Self {
            pool_size,
            endpoint_uri: endpoint_uri.into(),
            domain_name: domain_name.into(),
            environment,
            conn_options,
            pool: RwLock::new(None),
            build_lock: Mutex::new(()),
        }
    }

    /// Hands out a stub channel, lazily building the pool on first call.
    pub async fn conn(&self) -> Result<Channel, Error> {
        if let Some(pool) = self.pool.read().await.as_ref() {
            return Ok(pool.ring.next());
        }
        Ok(self.build_or_join().await?.ring.next())
    }

    async fn build_or_join(&self) -> Result<Arc<Pool>, Error> {
        // Serialize builders so at most one socket-creating call is in
        // flight, but never hold that lock while connecting: `build` below
        // runs unlocked. A loser of the race below simply drops its own
        // speculative pool and reuses the winner's.
        let _guard = self.build_lock.lock().await;
        if let Some(pool) = self.pool.read().await.as_ref() {
            return Ok(pool.clone());
        }
        let built = Arc::new(
            Pool::build(self.pool_size, &self.endpoint_uri, &self.domain_name, &self.environment, &self.conn_options)
                .await?,
        );
        let mut slot = self.pool.write().await;
        if slot.is_none() {
            *slot = Some(built.clone());
        }
        Ok(slot.as_ref().unwrap().clone())
    }

    /// Drops the current pool. The next `conn()` call rebuilds it lazily.
    /// Used by tests and as a hook for future credential-rotation support.
    pub async fn reset(&self) {
        *self.pool.write().await = None;
    }

    pub async fn num(&self) -> usize {
        match self.pool.read().await.as_ref() {
            Some(pool) => pool.ring.values.len(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::conn::AtomicRing;

    #[test]
    fn test_atomic_ring() {
        let cm = AtomicRing::<&str> {
            index: AtomicUsize::new(usize::MAX - 1),
            values: vec!["a", "b", "c", "d"],
        };
        let mut values = HashSet::new();
        assert_eq!(usize::MAX - 1, cm.index.load(Ordering::SeqCst));
        assert!(values.insert(cm.next()));
        assert_eq!(usize::MAX, cm.index.load(Ordering::SeqCst));
        assert!(values.insert(cm.next()));
        assert_eq!(0, cm.index.load(Ordering::SeqCst));
        assert!(values.insert(cm.next()));
        assert_eq!(1, cm.index.load(Ordering::SeqCst));
        assert!(values.insert(cm.next()));
        assert_eq!(2, cm.index.load(Ordering::SeqCst));
        assert!(!values.insert(cm.next()));
        assert_eq!(3, cm.index.load(Ordering::SeqCst));
    }
}
