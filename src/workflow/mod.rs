pub mod identity;
pub mod session;

pub use identity::UserIdentity;
pub use session::{
    Action, ActionState, Applied, OpenOutcome, OpenTicket, RunTicket, Session, SubmitTicket, Tab,
};
