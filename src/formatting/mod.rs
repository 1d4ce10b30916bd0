pub mod teams;
pub mod utils;

pub use teams::{print_profile, print_team_detail, print_teams};
pub use utils::{format_relative_time, initials, mask_token, truncate};
