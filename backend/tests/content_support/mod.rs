//! Shared setup for content integration tests.
//!
//! Each test gets its own database cloned from a migrated template on the
//! shared embedded PostgreSQL cluster, so tests never see each other's rows.
//! The template is keyed by a hash of the migrations directory and is
//! rebuilt whenever the schema changes.

mod cluster_skip;

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use blogicum::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselCommentRepository, DieselLocationRepository,
    DieselPostRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use blogicum::test_support::MutableClock;
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use rstest::fixture;
use tokio::runtime::Runtime;
use uuid::Uuid;

pub use cluster_skip::handle_cluster_setup_failure;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "blogicum_template";
const TEMPLATE_PROVISION_RETRIES: usize = 5;
const TEMPLATE_PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Instant the test clock starts at.
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid start instant")
}

/// Diesel adapters sharing one pool and one controllable clock.
pub struct Repositories {
    pub clock: Arc<MutableClock>,
    pub users: DieselUserRepository,
    pub categories: DieselCategoryRepository,
    pub locations: DieselLocationRepository,
    pub posts: DieselPostRepository,
    pub comments: DieselCommentRepository,
}

/// A temporary database with its repositories and the runtime that drives
/// them.
pub struct ContentDatabase {
    runtime: Runtime,
    repositories: Repositories,
    _database: TemporaryDatabase,
}

impl ContentDatabase {
    /// Repositories bound to this database.
    pub const fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    /// Drive `future` to completion on the test runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_pending_migrations(&url).map_err(|err| format!("migrate template: {err}"))?;
    }

    Ok(template_name)
}

fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::new();
    for attempt in 1..=TEMPLATE_PROVISION_RETRIES {
        let provisioned = ensure_template_database(cluster).and_then(|template_name| {
            let db_name = format!("test_{}", Uuid::new_v4());
            cluster
                .temporary_database_from_template(db_name.as_str(), template_name.as_str())
                .map_err(|err| format!("create database from template: {err:?}"))
        });
        match provisioned {
            Ok(database) => return Ok(database),
            Err(error) => {
                last_error = format!("attempt {attempt}/{TEMPLATE_PROVISION_RETRIES}: {error}");
            }
        }
        if attempt < TEMPLATE_PROVISION_RETRIES {
            std::thread::sleep(TEMPLATE_PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}

fn setup_content_database() -> Result<ContentDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let database = provision_database(cluster)?;

    let config = PoolConfig::new(database.url().to_string())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    let clock = Arc::new(MutableClock::new(start()));
    let shared: Arc<dyn Clock> = clock.clone();
    let repositories = Repositories {
        clock,
        users: DieselUserRepository::new(pool.clone()),
        categories: DieselCategoryRepository::new(pool.clone(), shared.clone()),
        locations: DieselLocationRepository::new(pool.clone(), shared.clone()),
        posts: DieselPostRepository::new(pool.clone(), shared.clone()),
        comments: DieselCommentRepository::new(pool, shared),
    };

    Ok(ContentDatabase {
        runtime,
        repositories,
        _database: database,
    })
}

/// Fresh migrated database, or `None` when the cluster is skipped.
#[fixture]
pub fn content_db() -> Option<ContentDatabase> {
    match setup_content_database() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
