//! Recipe feed module
//!
//! This module handles browsing:
//! - Tag filtering with exact set matching (filter.rs)
//! - The one-card-at-a-time swipe session (session.rs)
//! - Turning a drag into a like/dislike decision (gesture.rs)

pub mod filter;
pub mod gesture;
pub mod session;
