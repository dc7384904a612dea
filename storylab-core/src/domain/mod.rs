//! Domain types: market states, scenes, stories, data points, events.

pub mod event;
pub mod point;
pub mod scene;

pub use event::{EventKind, SimulatedEvent};
pub use point::{DataPoint, Series};
pub use scene::{MarketState, Scene, Story};
