pub mod clock;

pub use clock::{FixedTimeService, SystemTimeService};
