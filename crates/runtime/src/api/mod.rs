//! Public API surface: the handle, collaborator traits, and views.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod snapshot;

pub use errors::{Result, SessionError};
pub use handle::SessionHandle;
pub use providers::{
    ConfigProvider, FinishOutcome, FinishReport, OfflineSessionBackend, SessionBackend,
    SessionTicket, StaticConfigProvider,
};
pub use snapshot::{Lifecycle, SessionResult, SessionSnapshot, SlotView};
