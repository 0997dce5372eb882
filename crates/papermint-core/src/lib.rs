//! # papermint-core
//!
//! The two components with real invariants: the coin [`Ledger`] and the
//! file-[`ProcessingSession`] state machine.  Both take their collaborators
//! (persistence, identity stats, delay, transform) as injected traits so the
//! logic can be exercised entirely in memory.

pub mod intake;
pub mod ledger;
pub mod session;
pub mod time;
pub mod transform;

pub use ledger::{Ledger, LedgerStore, UserDirectory};
pub use session::{EarnRequest, ProcessingSession, ProcessingTicket, SessionState};
pub use time::Timer;
pub use transform::{SimulatedCompression, Transform};
