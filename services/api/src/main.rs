use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use api::config::AppConfig;
use api::jwt::JwtService;
use api::repositories::{
    MovieRepository, SessionRepository, TicketRepository, UserRepository,
};
use api::routes::create_router;
use api::state::AppState;
use common::database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cinema booking service");

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let pool = database::init_pool(&config.database).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations applied");

    let jwt_service = JwtService::new(&config.jwt);

    let app_state = AppState {
        db_pool: pool.clone(),
        jwt_service,
        user_repository: UserRepository::new(pool.clone()),
        movie_repository: MovieRepository::new(pool.clone()),
        session_repository: SessionRepository::new(pool.clone(), config.seat_grid.clone()),
        ticket_repository: TicketRepository::new(pool),
    };

    // Start the web server
    let app = create_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Cinema booking service listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
