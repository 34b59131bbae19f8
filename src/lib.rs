//! Hourcast forecast library
//!
//! Fetches a multi-day hourly weather forecast for a location and exposes
//! current conditions, a rolling 24-hour outlook strip anchored at the
//! current hour, and a multi-day summary list. This crate is an in-process
//! library consumed by a UI shell that observes [`controller::PresentationState`].

pub mod controller;
pub mod data;
pub mod location;
pub mod window;
