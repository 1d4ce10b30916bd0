use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::clipboard;
use crate::config::{load_config, save_config};
use crate::constants::{MSG_JOIN_FAILED, MSG_LINK_FAILED};
use crate::error::{CollabError, CollabResult, ErrorContext};
use crate::formatting::{print_team_detail, print_teams};
use crate::navigation::Route;

use super::team_id_arg;

pub async fn handle_teams(matches: &ArgMatches) -> CollabResult<()> {
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("simple");

    let mut context = CliContext::load()?;
    let store = context.authenticated().await?;

    // Bootstrap already loaded the list; refresh only if it did not
    if store.teams.state().list.is_idle() {
        store.fetch_teams().await?;
    }

    let teams = &store.teams.state().teams;
    if format != "json" && !teams.is_empty() {
        println!("Found {} teams:", teams.len());
    }
    print_teams(teams, format);
    Ok(())
}

pub async fn handle_team_create(matches: &ArgMatches) -> CollabResult<()> {
    let name = matches
        .get_one::<String>("name")
        .ok_or_else(|| CollabError::InvalidInput("Team name is required".to_string()))?;

    let mut context = CliContext::load()?;
    let store = context.authenticated().await?;

    let result = store.create_team(name).await.map(|_| ());
    if let Err(e) = result {
        if let Some(message) = &store.teams.state().list.error {
            eprintln!("{} {}", "✗".red(), message.red());
        }
        return Err(e);
    }

    println!("{} Team '{}' created.", "✅".green(), name.bold());
    print_teams(&store.teams.state().teams, "simple");
    Ok(())
}

pub async fn handle_team_show(matches: &ArgMatches) -> CollabResult<()> {
    let team_id = team_id_arg(matches)?;

    let mut context = CliContext::load()?;
    let store = context.authenticated().await?;

    match store.fetch_team_by_id(&team_id).await? {
        Some(team) => print_team_detail(team),
        None => println!("{}", "Team not found.".dimmed()),
    }
    Ok(())
}

pub async fn handle_add_member(matches: &ArgMatches) -> CollabResult<()> {
    let team_id = team_id_arg(matches)?;
    let email = matches
        .get_one::<String>("email")
        .ok_or_else(|| CollabError::InvalidInput("Email is required".to_string()))?;

    let mut context = CliContext::load()?;
    let store = context.authenticated().await?;

    if let Err(e) = store.add_member_to_team(&team_id, email).await {
        if let Some(message) = &store.teams.state().add_member.error {
            eprintln!("{} {}", "✗".red(), message.red());
        }
        return Err(e);
    }

    println!("{} Added {} to the team.", "✅".green(), email.bold());
    if let Some(team) = &store.teams.state().current_team {
        println!("The team now has {} members.", team.members.len());
    }
    Ok(())
}

pub async fn handle_team_link(matches: &ArgMatches) -> CollabResult<()> {
    let team_id = team_id_arg(matches)?;

    let mut context = CliContext::load()?;
    let store = context.authenticated().await?;

    println!("{}", "Generating invitation link...".dimmed());
    let result = store.generate_join_link(&team_id).await.map(|_| ());
    if let Err(e) = result {
        let message = store
            .teams
            .state()
            .join_link_op
            .error
            .clone()
            .unwrap_or_else(|| MSG_LINK_FAILED.to_string());
        eprintln!("{} {}", "✗".red(), message.red());
        return Err(e);
    }

    let link = store
        .teams
        .state()
        .join_link
        .clone()
        .context("Server returned no join link")?;
    println!("{}", link.bright_blue());
    println!("{}", "Anyone with this link can join the team until it expires.".dimmed());

    if matches.get_flag("copy") {
        if clipboard::try_copy(&link) {
            println!("{} Link copied to clipboard!", "✓".green());
        } else {
            eprintln!("{} Could not access the clipboard; copy the link above.", "⚠".yellow());
        }
    }
    Ok(())
}

pub async fn handle_team_join(matches: &ArgMatches) -> CollabResult<()> {
    let link = matches
        .get_one::<String>("link")
        .ok_or_else(|| CollabError::InvalidInput("Join link is required".to_string()))?;

    let mut context = CliContext::load()?;
    let store = context.authenticated().await?;

    let result = store.join_team_with_url(link).await;
    match result {
        Ok(message) => {
            println!("{} {}", "✅".green(), message);
            let joined = store.teams.state().current_team.as_ref().map(|team| {
                println!("Team: {} ({} members)", team.name.bold(), team.members.len());
                team.id.clone()
            });
            if let Some(team_id) = joined {
                context.navigator().navigate(Route::Team(team_id));
            }
            Ok(())
        }
        Err(e) => {
            let message = store
                .teams
                .state()
                .join_team
                .error
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| MSG_JOIN_FAILED.to_string());
            eprintln!("{} {}", "✗".red(), message.red());
            Err(e)
        }
    }
}

pub async fn handle_team_default(matches: &ArgMatches) -> CollabResult<()> {
    let mut config = load_config();
    match matches.get_one::<String>("team") {
        Some(team_id) => {
            config.default_team_id = Some(team_id.clone());
            save_config(&config)?;
            println!("Default team set to {}", team_id.bold());
        }
        None => match config.default_team_id {
            Some(team_id) => println!("Default team: {}", team_id),
            None => println!("No default team configured"),
        },
    }
    Ok(())
}
