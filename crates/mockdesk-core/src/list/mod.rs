//! Client-side list state: snapshot, search, pagination and
//! commit-after-confirm mutations.

mod config;
mod controller;
mod search;
mod view;
mod window;

pub use config::{IdAssignment, ListConfig};
pub use controller::{ListController, LoadState};
pub use search::SearchPredicate;
pub use view::{Page, visible_page};
pub use window::{DEFAULT_PAGE_SIZE, PaginationWindow};
