use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::error::{CollabError, CollabResult};
use crate::models::Visibility;

use super::team_id_arg;

pub async fn handle_channel_create(matches: &ArgMatches) -> CollabResult<()> {
    let team_id = team_id_arg(matches)?;
    let name = matches
        .get_one::<String>("name")
        .ok_or_else(|| CollabError::InvalidInput("Channel name is required".to_string()))?;
    let visibility = if matches.get_flag("private") {
        Visibility::Private
    } else {
        Visibility::Public
    };

    let mut context = CliContext::load()?;
    let store = context.authenticated().await?;

    if let Err(e) = store.create_channel(&team_id, name, visibility).await {
        if let Some(message) = &store.teams.state().create_channel.error {
            eprintln!("{} {}", "✗".red(), message.red());
        }
        return Err(e);
    }

    if let Some(message) = &store.teams.state().channel_message {
        println!("{} {}", "✅".green(), message.green());
    }
    if let Some(team) = &store.teams.state().current_team {
        println!("{} now has {} channels.", team.name.bold(), team.channels.len());
    }
    Ok(())
}
