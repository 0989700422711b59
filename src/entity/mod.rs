mod bot_error;
mod deal;
mod state;
mod user;

pub use bot_error::{BotError, DealError, ValidationError};
pub use deal::{Deal, DealDraft, PendingDeal};
pub use state::State;
pub use user::User;
