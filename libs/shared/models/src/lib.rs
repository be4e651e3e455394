pub mod clock;
pub mod roles;

pub use clock::{Clock, FixedClock, SystemClock};
pub use roles::{Actor, ActorRole};
