//! Maud HTML components for the web UI.
//!
//! - `layout`: base page skeleton and navigation
//! - `card`: video cards, the card grid, and the feed header

pub mod card;
pub mod layout;

pub use card::{FeedHeader, VideoCard, VideoGrid};
pub use layout::BaseLayout;
