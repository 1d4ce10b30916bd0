use std::fs;
use std::path::Path;
use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::config::{get_api_url, load_config, save_config};
use crate::collab_error;
use crate::error::{CollabError, CollabResult, ErrorContext};
use crate::formatting::{mask_token, print_profile};
use crate::logging::get_log_file_path;
use crate::models::{Credentials, ProfileImage, RegisterForm};
use crate::navigation::Route;
use crate::state::team::is_valid_email;

fn required<'a>(matches: &'a ArgMatches, name: &str) -> CollabResult<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| collab_error!(InvalidInput, "{} is required", name))
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub(crate) fn load_avatar(path: &str) -> CollabResult<ProfileImage> {
    let path = Path::new(path);
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read profile image {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar")
        .to_string();
    Ok(ProfileImage {
        file_name,
        mime_type: mime_for(path).to_string(),
        bytes,
    })
}

pub async fn handle_register(matches: &ArgMatches) -> CollabResult<()> {
    let email = required(matches, "email")?.trim().to_string();
    if !is_valid_email(&email) {
        return Err(CollabError::InvalidInput("Please enter a valid email address.".to_string()));
    }

    let form = RegisterForm {
        name: required(matches, "name")?.trim().to_string(),
        email,
        password: required(matches, "password")?.clone(),
        profile_image: matches
            .get_one::<String>("avatar")
            .map(|path| load_avatar(path))
            .transpose()?,
    };

    let mut context = CliContext::load()?;
    let session = &mut context.store().session;

    if let Err(e) = session.register(&form).await {
        eprintln!("{} {}", "✗".red(), session.state().message.red());
        return Err(e);
    }

    println!("{} {}", "✅".green(), "Account created successfully!".green().bold());
    match &session.state().user {
        Some(user) if session.state().token.is_some() => print_profile(user),
        _ => println!("Run 'collab login' to sign in."),
    }
    session.reset_signup_success();
    Ok(())
}

pub async fn handle_login(matches: &ArgMatches) -> CollabResult<()> {
    let credentials = Credentials {
        email: required(matches, "email")?.trim().to_string(),
        password: required(matches, "password")?.clone(),
    };

    let mut context = CliContext::load()?;
    let session = &mut context.store().session;

    if let Err(e) = session.login(&credentials).await {
        eprintln!("{} {}", "✗".red(), session.state().message.red());
        return Err(e);
    }
    if let Err(e) = session.fetch_profile().await {
        eprintln!("{} {}", "✗".red(), session.state().message.red());
        return Err(e);
    }

    println!("{} {}", "✅".green(), "Login successful!".green().bold());
    if let Some(user) = &session.state().user {
        println!("Welcome back, {}!", user.first_name());
    }
    context.navigator().navigate(Route::Dashboard);
    Ok(())
}

pub async fn handle_logout(_matches: &ArgMatches) -> CollabResult<()> {
    let mut context = CliContext::load()?;
    context.store().session.logout();
    println!("Logged out.");
    Ok(())
}

pub async fn handle_auth(matches: &ArgMatches) -> CollabResult<()> {
    if let Some(api_url) = matches.get_one::<String>("api-url") {
        let mut config = load_config();
        config.api_url = Some(api_url.trim_end_matches('/').to_string());
        save_config(&config)?;
        println!("API URL saved: {}", api_url);
        return Ok(());
    }

    let mut context = CliContext::load()?;
    println!("API URL: {}", get_api_url(context.config()));

    let stored = context.store().session.store().load();
    match stored.token {
        Some(token) => println!("Token: {}", mask_token(&token)),
        None => println!("No session stored. Run 'collab login' to sign in."),
    }
    if let Some(user) = stored.user {
        println!("Stored user: {} ({})", user.name, user.email);
    }
    if let Some(path) = get_log_file_path() {
        println!("Log file: {}", path.display());
    }
    Ok(())
}
