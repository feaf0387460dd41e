//! Database Test Utilities
//!
//! Provides a disposable PostgreSQL container with the LightBnB schema
//! loaded, and helpers for seeding it from a [`FixtureSet`].

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use tokio::sync::OnceCell;

use infra_db::FixtureSet;

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "lightbnb_test";

const CONNECT_ATTEMPTS: u32 = 10;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container with the schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or the schema fails
    /// to apply.
    pub async fn new() -> Result<Self, BoxError> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();

        let config = TestDatabaseConfig {
            host,
            port,
            ..Default::default()
        };

        let pool = connect(&config.connection_url()).await?;

        let test_db = Self {
            _container: container,
            config,
            pool,
        };

        test_db.init_schema().await?;

        Ok(test_db)
    }

    /// Starts a container and loads `fixtures` into it
    pub async fn seeded(fixtures: &FixtureSet) -> Result<Self, BoxError> {
        let db = Self::new().await?;
        db.seed(fixtures).await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), BoxError> {
        let schema = include_str!("../../../migrations/01_schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts every fixture row with its own id, then moves each id
    /// sequence past the highest seeded id
    pub async fn seed(&self, fixtures: &FixtureSet) -> Result<(), BoxError> {
        let mut tx = self.pool.begin().await?;

        for user in &fixtures.users {
            sqlx::query("INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4)")
                .bind(user.id.value())
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.password)
                .execute(&mut *tx)
                .await?;
        }

        for p in &fixtures.properties {
            sqlx::query(
                r#"
                INSERT INTO properties (
                    id, owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                    cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                    country, street, city, province, post_code
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                "#,
            )
            .bind(p.id.value())
            .bind(p.owner_id.value())
            .bind(&p.title)
            .bind(&p.description)
            .bind(&p.thumbnail_photo_url)
            .bind(&p.cover_photo_url)
            .bind(p.cost_per_night.minor_units())
            .bind(p.parking_spaces)
            .bind(p.number_of_bathrooms)
            .bind(p.number_of_bedrooms)
            .bind(&p.country)
            .bind(&p.street)
            .bind(&p.city)
            .bind(&p.province)
            .bind(&p.post_code)
            .execute(&mut *tx)
            .await?;
        }

        for r in &fixtures.reservations {
            sqlx::query(
                "INSERT INTO reservations (id, start_date, property_id, guest_id) VALUES ($1, $2, $3, $4)",
            )
            .bind(r.id.value())
            .bind(r.start_date)
            .bind(r.property_id.value())
            .bind(r.guest_id.value())
            .execute(&mut *tx)
            .await?;
        }

        for review in &fixtures.reviews {
            sqlx::query("INSERT INTO property_reviews (guest_id, property_id, rating) VALUES ($1, $2, $3)")
                .bind(review.guest_id.value())
                .bind(review.property_id.value())
                .bind(review.rating)
                .execute(&mut *tx)
                .await?;
        }

        for table in ["users", "properties", "reservations"] {
            sqlx::query(&format!(
                "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
                 COALESCE((SELECT MAX(id) FROM {table}), 0) + 1, false)"
            ))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Clears all data and resets the id sequences, keeping the schema
    pub async fn clear_data(&self) -> Result<(), BoxError> {
        sqlx::query(
            "TRUNCATE TABLE property_reviews, reservations, properties, users RESTART IDENTITY CASCADE",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Connects with retries; postgres logs readiness once during init before
/// restarting for real.
async fn connect(url: &str) -> Result<PgPool, BoxError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(_) if attempt < CONNECT_ATTEMPTS => {
                tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Global test database for shared integration tests
static SHARED_TEST_DB: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// Gets or creates a shared database seeded with [`crate::seed_fixtures`]
///
/// Tests using it must not write.
///
/// # Panics
///
/// Panics if the database fails to initialize
pub async fn get_shared_test_database() -> Arc<TestDatabase> {
    SHARED_TEST_DB
        .get_or_init(|| async {
            Arc::new(
                TestDatabase::seeded(&crate::fixtures::seed_fixtures())
                    .await
                    .expect("Failed to create shared test database"),
            )
        })
        .await
        .clone()
}

/// Creates an isolated test database for a single test
///
/// Use this when tests need to modify data and isolation is required
pub async fn create_isolated_test_database() -> Result<TestDatabase, BoxError> {
    TestDatabase::seeded(&crate::fixtures::seed_fixtures()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_connection_url() {
        let config = TestDatabaseConfig::default();
        let url = config.connection_url();

        assert!(url.starts_with("postgres://"));
        assert!(url.contains(POSTGRES_USER));
        assert!(url.ends_with("/lightbnb_test"));
    }
}
