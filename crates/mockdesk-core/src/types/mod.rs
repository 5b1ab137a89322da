//! Validated identifier and location types.
//!
//! These types enforce their invariants at construction time, so a value
//! that exists is always usable in a request path.

mod base_url;
mod record_id;
mod resource;

pub use base_url::BaseUrl;
pub use record_id::RecordId;
pub use resource::Resource;
