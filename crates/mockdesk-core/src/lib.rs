//! mockdesk-core - Core types, traits and client-side state for mockdesk.
//!
//! Everything that talks to the outside world does so through the traits in
//! [`traits`]; the controllers in [`list`] and [`auth`] own their state and
//! receive their collaborators by construction.
//!
//! # Example
//!
//! ```no_run
//! use mockdesk_core::list::{ListConfig, ListController};
//! use mockdesk_core::{MemoryStore, RemoteCollection};
//!
//! # async fn example(client: impl RemoteCollection) {
//! let mut users = ListController::new(client, MemoryStore::new(), ListConfig::users());
//! users.load().await;
//! users.set_search("leanne");
//!
//! for record in users.visible_page().records {
//!     println!("{:?}", record.text("name"));
//! }
//! # }
//! ```

pub mod auth;
pub mod credentials;
pub mod error;
pub mod list;
pub mod models;
pub mod record;
pub mod routes;
pub mod scope;
pub mod store;
pub mod traits;
pub mod types;
pub mod validation;

pub use auth::{Authenticator, LoginOutcome, SignupForm};
pub use credentials::Credentials;
pub use error::Error;
pub use models::{Company, Post, User};
pub use record::Record;
pub use routes::{Navigation, Route};
pub use scope::{Scope, ScopeToken};
pub use store::MemoryStore;
pub use traits::{CredentialSource, KeyValueStore, ListParams, RemoteCollection};
pub use types::{BaseUrl, RecordId, Resource};
pub use validation::{Schema, ValidationErrors};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
