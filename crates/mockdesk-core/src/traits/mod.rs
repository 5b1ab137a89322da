//! Seams to the outside world: remote collections, the credential endpoint
//! and the local cache.

mod collection;
mod credentials;
mod store;

pub use collection::{ListParams, RemoteCollection};
pub use credentials::CredentialSource;
pub use store::KeyValueStore;
