//! Connection tracking so shutdown can wait for in-flight requests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;

use crate::server::shutdown::ShutdownManager;

/// Wraps a make-service and counts the connections it creates.
pub(crate) struct ConnectionCounter<M> {
    inner: M,
    tracker: Arc<ShutdownManager>,
}

impl<M> ConnectionCounter<M> {
    pub(crate) fn new(inner: M, tracker: Arc<ShutdownManager>) -> Self {
        Self { inner, tracker }
    }
}

impl<M: Clone> Clone for ConnectionCounter<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            tracker: self.tracker.clone(),
        }
    }
}

impl<M, T> Service<T> for ConnectionCounter<M>
where
    M: Service<T> + Send,
    M::Future: Send + 'static,
    M::Response: Send + 'static,
{
    type Response = TrackedConnection<M::Response>;
    type Error = M::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, target: T) -> Self::Future {
        let tracker = self.tracker.clone();
        tracker.increment_connections();
        let pending = self.inner.call(target);

        Box::pin(async move {
            pending
                .await
                .map(|inner| TrackedConnection {
                    inner,
                    tracker: tracker.clone(),
                })
                .inspect_err(|_| tracker.decrement_connections())
        })
    }
}

/// Service for one accepted connection. Every live copy holds one count.
pub(crate) struct TrackedConnection<S> {
    inner: S,
    tracker: Arc<ShutdownManager>,
}

impl<S: Clone> Clone for TrackedConnection<S> {
    fn clone(&self) -> Self {
        self.tracker.increment_connections();
        Self {
            inner: self.inner.clone(),
            tracker: self.tracker.clone(),
        }
    }
}

impl<S> Drop for TrackedConnection<S> {
    fn drop(&mut self) {
        self.tracker.decrement_connections();
    }
}

impl<S, Req> Service<Req> for TrackedConnection<S>
where
    S: Service<Req>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        self.inner.call(req)
    }
}
