use actix_web::{web, App, HttpServer};
use bookstore::config::db::{DbKind, DbProfile};
use bookstore::infra::state::build_state;
use bookstore::middleware::request_trace::RequestTrace;
use bookstore::middleware::structured_logger::StructuredLogger;
use bookstore::routes;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BOOKSTORE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BOOKSTORE_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BOOKSTORE_PORT must be a valid port number");
            std::process::exit(1);
        });

    println!("🚀 Starting Bookstore Backend on http://{}:{}", host, port);

    // Create application state using unified builder
    let app_state = match build_state()
        .with_db(DbKind::Postgres, DbProfile::Prod)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Database connected");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
