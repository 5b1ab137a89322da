//! mockdesk-http - REST backends for mockdesk.
//!
//! [`HttpCollection`] speaks the collections API (`/posts`, `/users`) and
//! [`HttpCredentialSource`] the demo auth API. Both are thin: one request
//! per call, non-2xx answers become
//! [`TransportError`](mockdesk_core::error::TransportError)s, nothing is
//! retried.
//!
//! # Example
//!
//! ```no_run
//! use mockdesk_core::list::{ListConfig, ListController};
//! use mockdesk_core::{BaseUrl, MemoryStore, Resource};
//! use mockdesk_http::HttpCollection;
//!
//! # async fn example() -> mockdesk_core::Result<()> {
//! let api = BaseUrl::new("https://jsonplaceholder.typicode.com")?;
//! let posts = HttpCollection::new(api, Resource::posts())?;
//! let mut controller = ListController::new(posts, MemoryStore::new(), ListConfig::posts());
//! controller.load().await;
//! # Ok(())
//! # }
//! ```

mod client;
mod collection;
mod credentials;
mod endpoints;

pub use client::{NETWORK_ERROR, RestClient};
pub use collection::HttpCollection;
pub use credentials::HttpCredentialSource;

/// Default collections API.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default credential API.
pub const DEFAULT_AUTH_URL: &str = "https://dummyjson.com";
