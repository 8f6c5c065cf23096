//! Controller layer: UI events, reducer-like state transitions, drop routing,
//! and command orchestration.

pub mod drop_routing;
pub mod events;
pub mod orchestration;
pub mod reducer;
