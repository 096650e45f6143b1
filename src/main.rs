use clap::Parser;
use exercise_tracker::cli::{self, Cli, Command};
use exercise_tracker::config::Config;
use exercise_tracker::{build_app, db};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let command = Cli::parse().command();

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("exercise_tracker=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;

    match command {
        Command::Serve => {
            let app = build_app(pool);
            let addr = config.addr();
            let listener = TcpListener::bind(addr).await?;

            tracing::info!("listening on {}", addr);
            axum::serve(listener, app).await?;
        }
        Command::CreateUser { username } => cli::create_user(&pool, &username).await?,
        Command::Import { file, user_id } => {
            let imported = cli::import_exercises(&pool, &file, &user_id).await?;
            println!("Imported {} exercises", imported);
        }
    }

    Ok(())
}
