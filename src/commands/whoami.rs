use clap::ArgMatches;
use crate::cli_context::CliContext;
use crate::formatting::print_profile;

pub async fn handle_whoami(_matches: &ArgMatches) -> crate::error::CollabResult<()> {
    let mut context = CliContext::load()?;
    let store = context.authenticated().await?;

    if let Some(user) = &store.session.state().user {
        print_profile(user);
    }
    println!("Teams: {}", store.teams.state().teams.len());

    Ok(())
}
