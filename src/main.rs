use std::process;

use clap::{Arg, ArgAction, Command};
use colored::*;

use collab_cli::commands::auth::{handle_auth, handle_login, handle_logout, handle_register};
use collab_cli::commands::channels::handle_channel_create;
use collab_cli::commands::teams::{
    handle_add_member, handle_team_create, handle_team_default, handle_team_join, handle_team_link,
    handle_team_show, handle_teams,
};
use collab_cli::commands::whoami::handle_whoami;
use collab_cli::logging::{init_logging, log_error, log_panic_info};

fn team_arg() -> Arg {
    Arg::new("team")
        .long("team")
        .short('t')
        .value_name("TEAM_ID")
        .help("Team ID (defaults to the configured default team)")
}

fn build_cli() -> Command {
    Command::new("collab")
        .about("CollabSpace CLI - Work with your teams and channels from the command line")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("register")
                .about("Create a new account")
                .arg(Arg::new("name").long("name").short('n').value_name("NAME").help("Full name").required(true))
                .arg(Arg::new("email").long("email").short('e').value_name("EMAIL").help("Email address").required(true))
                .arg(Arg::new("password").long("password").short('p').value_name("PASSWORD").help("Password").required(true))
                .arg(Arg::new("avatar").long("avatar").value_name("FILE").help("Profile image to upload"))
        )
        .subcommand(
            Command::new("login")
                .about("Sign in")
                .arg(Arg::new("email").long("email").short('e').value_name("EMAIL").help("Email address").required(true))
                .arg(Arg::new("password").long("password").short('p').value_name("PASSWORD").help("Password").required(true))
        )
        .subcommand(Command::new("logout").about("Sign out and forget the stored session"))
        .subcommand(
            Command::new("auth")
                .about("Show the stored session or configure the API endpoint")
                .arg(
                    Arg::new("api-url")
                        .long("api-url")
                        .value_name("URL")
                        .help("Set the API base URL")
                )
        )
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("teams")
                .about("List your teams")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .help("Output format: simple, table, json")
                        .default_value("simple")
                )
        )
        .subcommand(
            Command::new("team")
                .about("Manage a team")
                .subcommand_required(true)
                .subcommand(
                    Command::new("create")
                        .about("Create a new team")
                        .arg(Arg::new("name").value_name("NAME").help("Team name").required(true).index(1))
                )
                .subcommand(
                    Command::new("show")
                        .about("Show members and channels of a team")
                        .arg(team_arg())
                )
                .subcommand(
                    Command::new("add-member")
                        .about("Add a registered user to a team by email")
                        .arg(Arg::new("email").value_name("EMAIL").help("Email of the user to add").required(true).index(1))
                        .arg(team_arg())
                )
                .subcommand(
                    Command::new("link")
                        .about("Generate an invitation link")
                        .arg(team_arg())
                        .arg(
                            Arg::new("copy")
                                .long("copy")
                                .short('c')
                                .help("Copy the link to the clipboard")
                                .action(ArgAction::SetTrue)
                        )
                )
                .subcommand(
                    Command::new("join")
                        .about("Join a team with an invitation link")
                        .arg(Arg::new("link").value_name("LINK").help("Invitation link").required(true).index(1))
                )
                .subcommand(
                    Command::new("default")
                        .about("Show or set the default team")
                        .arg(Arg::new("team").value_name("TEAM_ID").help("Team ID to use by default").index(1))
                )
        )
        .subcommand(
            Command::new("channel")
                .about("Manage channels")
                .subcommand_required(true)
                .subcommand(
                    Command::new("create")
                        .about("Create a channel in a team")
                        .arg(Arg::new("name").value_name("NAME").help("Channel name").required(true).index(1))
                        .arg(team_arg())
                        .arg(
                            Arg::new("private")
                                .long("private")
                                .help("Only invited members can see the channel")
                                .action(ArgAction::SetTrue)
                        )
                )
        )
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("{} Logging disabled: {}", "⚠".yellow(), e);
    }
    std::panic::set_hook(Box::new(|info| {
        log_panic_info(info);
        eprintln!("{}", info);
    }));

    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("register", sub_matches)) => handle_register(sub_matches).await,
        Some(("login", sub_matches)) => handle_login(sub_matches).await,
        Some(("logout", sub_matches)) => handle_logout(sub_matches).await,
        Some(("auth", sub_matches)) => handle_auth(sub_matches).await,
        Some(("whoami", sub_matches)) => handle_whoami(sub_matches).await,
        Some(("teams", sub_matches)) => handle_teams(sub_matches).await,
        Some(("team", sub_matches)) => {
            match sub_matches.subcommand() {
                Some(("create", team_matches)) => handle_team_create(team_matches).await,
                Some(("show", team_matches)) => handle_team_show(team_matches).await,
                Some(("add-member", team_matches)) => handle_add_member(team_matches).await,
                Some(("link", team_matches)) => handle_team_link(team_matches).await,
                Some(("join", team_matches)) => handle_team_join(team_matches).await,
                Some(("default", team_matches)) => handle_team_default(team_matches).await,
                _ => {
                    eprintln!("Unknown team subcommand. Use 'collab team --help' for available options.");
                    process::exit(1);
                }
            }
        }
        Some(("channel", sub_matches)) => {
            match sub_matches.subcommand() {
                Some(("create", channel_matches)) => handle_channel_create(channel_matches).await,
                _ => {
                    eprintln!("Unknown channel subcommand. Use 'collab channel --help' for available options.");
                    process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("Unknown command. Use 'collab --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        log_error(&e.to_string());
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
