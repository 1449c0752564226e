//! Application orchestration layer for Book Connect.
//!
//! Filtering, pagination, selection and theme resolution are pure functions;
//! [`CatalogSession`] is the only stateful piece and drives a [`Renderer`].

pub mod filter;
pub mod paginate;
pub mod selection;
pub mod theme;
pub mod view;

mod session;

pub use filter::ResultSet;
pub use paginate::{PageState, Window};
pub use session::{CatalogSession, Renderer};
pub use view::{BookDetail, BookPreview};
