pub mod app_state;
pub mod current_user;
pub mod role;
pub mod session;
pub mod user_record;

pub use app_state::AppState;
pub use current_user::{CurrentUser, Principal};
pub use role::Role;
pub use session::Session;
pub use user_record::UserRecord;
