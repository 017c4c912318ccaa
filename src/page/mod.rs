//! Page chrome around the field
//!
//! Plain DOM class toggling. The decisions (thresholds, offsets, delays) are
//! pure functions so they can be tested off the browser.

pub mod nav;
pub mod reveal;
