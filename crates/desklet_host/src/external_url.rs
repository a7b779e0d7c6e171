//! External URL host-service contracts.

use std::{future::Future, pin::Pin};

/// Object-safe boxed future used by [`ExternalUrlService`].
pub type ExternalUrlFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service opening bookmark links outside the desktop.
pub trait ExternalUrlService {
    /// Opens `url` in a new browsing context.
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op external URL service for unsupported targets.
pub struct NoopExternalUrlService;

impl ExternalUrlService for NoopExternalUrlService {
    fn open_url<'a>(&'a self, _url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}
