//! Background task that drives the session.

mod session;

pub(crate) use session::{Command, SessionWorker};
