//! Session: the control loop the presentation layer talks to.
//!
//! - `Session`: owns game, opponent, timers and observers
//! - `SessionEvent`: what observers hear about
//! - `GameSnapshot`: serializable frame for rendering
//! - `RealtimeDriver`: optional thread advancing a `SharedSession`

pub mod controller;
pub mod driver;
pub mod snapshot;

pub use controller::{Observer, Session, SessionEvent};
pub use driver::{RealtimeDriver, SharedSession};
pub use snapshot::{CardView, GameSnapshot};
