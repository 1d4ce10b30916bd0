pub mod auth;
pub mod channels;
pub mod teams;
pub mod whoami;

use clap::ArgMatches;
use crate::config::load_config;
use crate::collab_error;
use crate::error::CollabResult;

/// Team id from the `team` argument, else the configured default team.
pub(crate) fn team_id_arg(matches: &ArgMatches) -> CollabResult<String> {
    if let Some(team_id) = matches.get_one::<String>("team") {
        return Ok(team_id.clone());
    }
    load_config().default_team_id.ok_or_else(|| {
        collab_error!(
            InvalidInput,
            "No team specified and no default team configured. Use 'collab team default <ID>'."
        )
    })
}
