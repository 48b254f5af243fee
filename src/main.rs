//! Fetches the token owner's profile, connections and guilds, and logs a
//! summary of each.
//!
//! Reads `DISCORD_TOKEN` (an OAuth2 access token with the `identify`,
//! `connections` and `guilds` scopes) from the environment or `.env`.

use tracing::{error, info};

use discord_models::{Config, DiscordSession, Guild, User, UserConnection};

#[tokio::main]
async fn main() {
    // Initialise tracing (respects RUST_LOG env, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "failed");
        std::process::exit(1);
    }
}

async fn run() -> discord_models::Result<()> {
    let config = Config::from_env()?;
    let mut session = DiscordSession::from_config(&config);

    let user = User::fetch_from_api(&mut session, true).await?;
    info!(user = %user, id = %user.id, "fetched current user");

    let connections = UserConnection::fetch_from_api(&mut session, true).await?;
    for conn in &connections {
        info!(
            id = %conn.id,
            kind = conn.kind.as_deref().unwrap_or("?"),
            name = conn.name.as_deref().unwrap_or("?"),
            visible = conn.is_visible(),
            integrations = conn.integrations.len(),
            "connection"
        );
    }

    let guilds = Guild::fetch_from_api(&mut session, true).await?;
    for guild in &guilds {
        info!(
            id = %guild.id,
            name = %guild,
            owner = guild.is_owner,
            "guild"
        );
    }

    if let Some(cached) = User::get_from_cache(&session) {
        info!(
            user = %cached,
            connections = cached.connections.as_ref().map_or(0, Vec::len),
            guilds = cached.guilds.as_ref().map_or(0, Vec::len),
            cache_size = session.users_cache().len(),
            "cached user refreshed"
        );
    }

    Ok(())
}
