pub mod op;
pub mod session;
pub mod store;
pub mod team;

pub use op::{OpState, OpStatus};
pub use session::{AuthStatus, SessionContainer, SessionState};
pub use store::AppStore;
pub use team::{TeamContainer, TeamState};
