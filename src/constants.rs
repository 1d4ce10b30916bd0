pub const COLLAB_API_URL: &str = "http://localhost:5000/api";
pub const CONFIG_FILE: &str = ".collab-cli-config.json";
pub const STORAGE_FILE: &str = "storage.json";
pub const APP_DIR: &str = "collab-cli";

// Durable storage keys
pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const AUTH_USER_KEY: &str = "auth_user";

// Environment overrides
pub const API_URL_ENV: &str = "COLLAB_API_URL";
pub const HOME_ENV: &str = "COLLAB_HOME";

// User-facing copy shared between the state containers and the CLI
pub const MSG_REGISTRATION_FAILED: &str = "Registration failed";
pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_PROFILE_FAILED: &str = "Failed to fetch user profile";
pub const MSG_FETCH_TEAM_FAILED: &str = "Failed to fetch team";
pub const MSG_ADD_MEMBER_FAILED: &str = "Failed to add member";
pub const MSG_EMAIL_NOT_REGISTERED: &str =
    "This email address is not registered. Please make sure the user has created an account first.";
pub const MSG_JOIN_FAILED: &str = "Failed to join the team.";
pub const MSG_ALREADY_MEMBER: &str = "You are already a member of this team.";
pub const MSG_LINK_EXPIRED: &str = "This team link has expired.";
pub const MSG_JOINED: &str = "You have joined the team.";
pub const MSG_LINK_FAILED: &str = "Failed to generate link";
pub const MSG_CHANNEL_NAME_REQUIRED: &str = "Please enter a channel name.";
pub const MSG_CHANNEL_CREATED: &str = "Channel created successfully!";
pub const MSG_CHANNEL_FAILED: &str = "Failed to create channel.";
pub const MSG_INVALID_TEAM_LINK: &str = "Invalid team link";
