//! Public endpoints: the quest entrance and robots.txt.

use axum::extract::State;

use crate::http::server::AppState;
use crate::quest::Level;

/// Line prefix the level-1 password is printed after on the home page.
pub const HOME_PASSWORD_PREFIX: &str = "Password: ";

/// Comment prefix the robots secret is printed after in robots.txt.
pub const ROBOTS_SECRET_PREFIX: &str = "# Secret: ";

pub async fn home(State(state): State<AppState>) -> String {
    format!(
        "Welcome to HTTP quest!\n\
         \n\
         Every level lives at {path_pattern} and is locked with a password.\n\
         Send it in the X-Password header to get the password for the next level.\n\
         Start with {first}.\n\
         \n\
         {prefix}{password}\n",
        path_pattern = "/level/<n>",
        first = Level::Plain.path(),
        prefix = HOME_PASSWORD_PREFIX,
        password = state.vault.password(Level::Plain),
    )
}

pub async fn robots_txt(State(state): State<AppState>) -> String {
    format!(
        "User-agent: *\n\
         Disallow: /level/\n\
         \n\
         # Humans are not welcome here, robots only.\n\
         {prefix}{secret}\n",
        prefix = ROBOTS_SECRET_PREFIX,
        secret = state.vault.robots_secret(),
    )
}
