//! Apply or revert the embedded content schema migrations.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::ffi::OsString;
use std::io;

use blogicum::config::DatabaseSettings;
use blogicum::outbound::persistence::{revert_all_migrations, run_pending_migrations};
use clap::Parser;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `blogicum-migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "blogicum-migrate",
    about = "Apply the Blogicum content schema migrations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `BLOGICUM_DATABASE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Revert every applied migration instead of applying pending ones.
    #[arg(long)]
    revert: bool,
}

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;

    let versions = if args.revert {
        revert_all_migrations(&database_url)
    } else {
        run_pending_migrations(&database_url)
    }
    .map_err(io::Error::other)?;

    info!(revert = args.revert, count = versions.len(), "migrations finished");
    Ok(())
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let settings = DatabaseSettings::load_from_iter([OsString::from("blogicum-migrate")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    settings
        .pool_config(env::var("DATABASE_URL").ok())
        .map(|config| config.database_url().to_owned())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))
}

#[cfg(test)]
mod tests {
    //! Unit tests for database URL resolution.

    use env_lock::lock_env;
    use rstest::rstest;

    use super::resolve_database_url;

    fn environment(
        blogicum_url: Option<&str>,
        database_url: Option<&str>,
    ) -> [(&'static str, Option<String>); 5] {
        [
            ("BLOGICUM_DATABASE_URL", blogicum_url.map(str::to_owned)),
            ("BLOGICUM_POOL_MAX_SIZE", None),
            ("BLOGICUM_POOL_MIN_IDLE", None),
            ("BLOGICUM_CONNECTION_TIMEOUT_SECS", None),
            ("DATABASE_URL", database_url.map(str::to_owned)),
        ]
    }

    #[rstest]
    fn resolve_database_url_rejects_empty_explicit() {
        let error = resolve_database_url(Some("   ".to_owned())).expect_err("empty should fail");
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[rstest]
    fn explicit_url_wins_over_environment() {
        let _guard = lock_env(environment(
            Some("postgres://settings/blogicum"),
            Some("postgres://env/blogicum"),
        ));

        let url = resolve_database_url(Some("postgres://flag/blogicum".to_owned()))
            .expect("explicit url");
        assert_eq!(url, "postgres://flag/blogicum");
    }

    #[rstest]
    fn prefixed_setting_wins_over_database_url() {
        let _guard = lock_env(environment(
            Some("postgres://settings/blogicum"),
            Some("postgres://env/blogicum"),
        ));

        let url = resolve_database_url(None).expect("configured url");
        assert_eq!(url, "postgres://settings/blogicum");
    }

    #[rstest]
    fn database_url_is_used_when_nothing_else_is_set() {
        let _guard = lock_env(environment(None, Some("postgres://env/blogicum")));

        let url = resolve_database_url(None).expect("fallback url");
        assert_eq!(url, "postgres://env/blogicum");
    }

    #[rstest]
    fn missing_url_is_reported_as_invalid_input() {
        let _guard = lock_env(environment(None, None));

        let error = resolve_database_url(None).expect_err("no url configured");
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidInput);
    }
}
