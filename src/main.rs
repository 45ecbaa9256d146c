use club_manager::{
    app_state::AppState,
    get_postgres_pool, get_redis_client,
    services::data_stores::{
        PostgresClubStore, PostgresMemberStore, RedisBannedTokenStore,
    },
    utils::{
        constants::{prod, DATABASE_URL, REDIS_HOST_NAME},
        tracing::init_tracing,
    },
    Application,
};
use color_eyre::eyre::{eyre, Result, WrapErr};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pg_pool = configure_postgresql().await?;
    let member_store =
        Arc::new(RwLock::new(PostgresMemberStore::new(pg_pool.clone())));
    let club_store = Arc::new(RwLock::new(PostgresClubStore::new(pg_pool)));

    let redis_connection = Arc::new(RwLock::new(configure_redis()?));
    let banned_token_store =
        Arc::new(RwLock::new(RedisBannedTokenStore::new(redis_connection)));

    let app_state = AppState::new(member_store, club_store, banned_token_store);

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .map_err(|e| eyre!("failed to build app: {e}"))?;

    app.run().await.wrap_err("server stopped unexpectedly")?;

    Ok(())
}

async fn configure_postgresql() -> Result<PgPool> {
    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .wrap_err("failed to create Postgres connection pool")?;

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .wrap_err("failed to run migrations")?;

    Ok(pg_pool)
}

fn configure_redis() -> Result<redis::Connection> {
    get_redis_client(REDIS_HOST_NAME.to_owned())
        .wrap_err("failed to get Redis client")?
        .get_connection()
        .wrap_err("failed to get Redis connection")
}
