pub mod area_template;
pub mod index_template;
pub mod login_template;
pub mod not_found_template;

pub use area_template::AreaTemplate;
pub use index_template::{AreaLink, IndexTemplate};
pub use login_template::LoginTemplate;
pub use not_found_template::NotFoundTemplate;
