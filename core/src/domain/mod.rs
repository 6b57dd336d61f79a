//! Domain layer: entities, value objects and the clock abstraction.

pub mod clock;
pub mod entities;
pub mod value_objects;

pub use clock::{Clock, ManualClock, SystemClock};
