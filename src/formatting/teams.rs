use colored::*;
use crate::models::{Role, Team, UserProfile, Visibility};
use super::utils::*;

pub fn print_teams(teams: &[Team], format: &str) {
    if teams.is_empty() {
        println!("{}", "No teams yet. Create one with 'collab team create <NAME>'.".dimmed());
        return;
    }

    match format {
        "json" => match serde_json::to_string_pretty(teams) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize teams: {}", e),
        },
        "table" => {
            println!("{}", "─".repeat(80).dimmed());
            println!(
                "{:<26} {:<30} {:>8} {:>10}",
                "ID".bold(),
                "Name".bold(),
                "Members".bold(),
                "Channels".bold()
            );
            println!("{}", "─".repeat(80).dimmed());
            for team in teams {
                println!(
                    "{:<26} {:<30} {:>8} {:>10}",
                    team.id.dimmed(),
                    truncate(&team.name, 30),
                    team.members.len(),
                    team.channels.len()
                );
            }
            println!("{}", "─".repeat(80).dimmed());
        }
        _ => {
            println!("{}", "Teams:".bold());
            for team in teams {
                println!(
                    "  {} {} ({} members) {}",
                    "▸".cyan(),
                    team.name.bold(),
                    team.members.len(),
                    team.id.dimmed()
                );
            }
        }
    }
}

pub fn print_team_detail(team: &Team) {
    println!("\n{} {}", initials(&team.name).on_blue().white().bold(), team.name.bold());
    println!("{}", "═".repeat(60).blue());
    println!("{}: {}", "ID".bold(), team.id.dimmed());
    if let Some(owner) = team.owner() {
        println!("{}: {}", "Owner".bold(), owner.display_name());
    }
    if let Some(created_at) = &team.created_at {
        println!("{}: {}", "Created".bold(), format_relative_time(created_at));
    }

    println!("\n{} ({})", "Members".bold(), team.members.len());
    for member in &team.members {
        let role = match team.role_of(member) {
            Role::Owner => Role::Owner.to_string().yellow().bold(),
            Role::Member => Role::Member.to_string().normal(),
        };
        println!(
            "  {} {} <{}> {}",
            initials(member.display_name()).cyan(),
            member.display_name(),
            member.email.dimmed(),
            role
        );
    }

    println!("\n{} ({})", "Channels".bold(), team.channels.len());
    if team.channels.is_empty() {
        println!("  {}", "No channels yet.".dimmed());
    }
    for channel in &team.channels {
        let marker = match channel.visibility {
            Visibility::Public => "#".green(),
            Visibility::Private => "🔒".yellow(),
        };
        println!(
            "  {} {} {}",
            marker,
            channel.name,
            format!("({} members)", channel.members.len()).dimmed()
        );
    }
}

pub fn print_profile(user: &UserProfile) {
    println!("Logged in as: {} ({})", user.name.bold(), user.email);
    println!("User ID: {}", user.id.dimmed());
}
