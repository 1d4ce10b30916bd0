//! One-time reconciliation of stored and in-memory session state at
//! startup.

use crate::logging::{log_error, log_info};
use crate::navigation::{Navigator, Route};
use crate::state::AppStore;

/// What a single evaluation of the startup rules did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapStep {
    /// A stored token was adopted into memory.
    AdoptedToken,
    /// The profile and team list were loaded for an adopted token.
    Restored,
    /// State could not be trusted; the session was cleared and the user sent
    /// to the login view.
    LoggedOut(String),
    /// Already consistent, or anonymous.
    Idle,
}

/// Evaluates the rules once, first match wins:
///
/// 1. stored token, no in-memory token: adopt it
/// 2. in-memory token, no user: fetch profile then teams; any failure logs out
/// 3. user without token: corrupted, log out
/// 4. otherwise nothing
pub async fn step(app: &mut AppStore, navigator: &dyn Navigator) -> BootstrapStep {
    let stored = app.session.store().load();
    let state = app.session.state().clone();

    if let (Some(token), None) = (stored.token, &state.token) {
        app.session.set_token(token);
        return BootstrapStep::AdoptedToken;
    }

    if state.token.is_some() && state.user.is_none() && !state.is_loading() {
        let result = match app.session.fetch_profile().await {
            Ok(_) => app.fetch_teams().await.map(|_| ()),
            Err(e) => Err(e),
        };
        return match result {
            Ok(()) => BootstrapStep::Restored,
            Err(e) => {
                log_error(&format!("Error initializing auth: {}", e));
                force_logout(app, navigator, e.to_string())
            }
        };
    }

    if state.token.is_none() && state.user.is_some() {
        return force_logout(app, navigator, "user present without a token".to_string());
    }

    BootstrapStep::Idle
}

fn force_logout(app: &mut AppStore, navigator: &dyn Navigator, reason: String) -> BootstrapStep {
    app.session.logout();
    navigator.navigate(Route::Login);
    BootstrapStep::LoggedOut(reason)
}

/// Re-evaluates after every change until state settles. Adopting a token
/// enables rule 2 on the next pass, so a stored session takes two steps.
pub async fn run(app: &mut AppStore, navigator: &dyn Navigator) -> Vec<BootstrapStep> {
    let mut steps = Vec::new();
    // Each rule can fire at most once before state settles
    for _ in 0..4 {
        let step = step(app, navigator).await;
        let settled = matches!(step, BootstrapStep::Idle | BootstrapStep::LoggedOut(_));
        steps.push(step);
        if settled {
            break;
        }
    }
    log_info(&format!("Bootstrap finished: {:?}", steps));
    steps
}
