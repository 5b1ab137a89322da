//! Consumer lifetime guard for in-flight requests.
//!
//! A view that owns a controller holds a [`Scope`]; the controller holds a
//! [`ScopeToken`]. Once the scope ends (explicitly or by drop) any request
//! still in flight is abandoned and its result is never written to state.

use std::future::Future;

use tokio::sync::watch;

use crate::{Error, Result};

/// Lifetime marker owned by the consumer of a controller.
#[derive(Debug)]
pub struct Scope {
    tx: watch::Sender<bool>,
}

impl Scope {
    /// Start a new, live scope.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// A token observing this scope.
    pub fn token(&self) -> ScopeToken {
        ScopeToken {
            rx: Some(self.tx.subscribe()),
        }
    }

    /// End the scope now.
    pub fn end(self) {
        drop(self);
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

/// Observer side of a [`Scope`].
///
/// A detached token (the default) never ends.
#[derive(Debug, Clone, Default)]
pub struct ScopeToken {
    rx: Option<watch::Receiver<bool>>,
}

impl ScopeToken {
    /// A token that is not tied to any scope.
    pub fn detached() -> Self {
        Self { rx: None }
    }

    /// Returns true while the scope has not ended.
    pub fn is_live(&self) -> bool {
        match &self.rx {
            None => true,
            Some(rx) => !*rx.borrow() && rx.has_changed().is_ok(),
        }
    }

    /// Resolves once the scope has ended.
    pub async fn ended(&self) {
        match &self.rx {
            None => std::future::pending::<()>().await,
            Some(rx) => {
                let mut rx = rx.clone();
                // A closed channel means the scope is gone as well.
                let _ = rx.wait_for(|ended| *ended).await;
            }
        }
    }

    /// Run `fut` unless the scope ends first.
    ///
    /// Returns [`Error::Cancelled`] if the scope had already ended, ends
    /// while `fut` is pending, or has ended by the time `fut` completes.
    pub async fn guard<F>(&self, fut: F) -> Result<F::Output>
    where
        F: Future,
    {
        if !self.is_live() {
            return Err(Error::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.ended() => Err(Error::Cancelled),
            output = fut => {
                if self.is_live() {
                    Ok(output)
                } else {
                    Err(Error::Cancelled)
                }
            }
        }
    }
}
