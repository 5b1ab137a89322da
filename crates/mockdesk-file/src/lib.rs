//! mockdesk-file - Filesystem backends for mockdesk.
//!
//! [`FileStore`] is the persistent cache behind the list controllers and
//! the authentication flag. [`FileCollection`] and [`FileCredentialSource`]
//! serve a `file://` API root from local JSON files, for offline use and
//! tests.

mod collection;
mod credentials;
mod io;
mod store;

pub use collection::FileCollection;
pub use credentials::FileCredentialSource;
pub use store::{CacheEntry, FileStore};
