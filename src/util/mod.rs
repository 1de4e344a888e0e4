//! Small helpers shared across widgets.

pub mod cookie;
