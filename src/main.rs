// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, storage, seed data and start HTTP server

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;

use hbnb::config::{self, Config, StorageBackend};
use hbnb::db::Storage;
use hbnb::handlers;
use hbnb::services::{seed_initial_data, HbnbFacade, TokenService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting HBnB API...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Build the storage backend
    let storage = match config.storage_backend {
        StorageBackend::Memory => {
            log::info!("Using in-memory storage; data is lost on restart");
            Storage::in_memory()
        }
        StorageBackend::Postgres => match config::init_db_pool(&config).await {
            Ok(pool) => Storage::postgres(pool),
            Err(e) => {
                log::error!("Failed to connect to database: {}", e);
                std::process::exit(1);
            }
        },
    };

    let tokens = TokenService::from_config(&config);
    let facade = HbnbFacade::new(storage, tokens.clone(), config.bcrypt_cost);

    // 5. Seed the admin account and default amenities
    if config.seed_on_startup {
        if let Err(e) = seed_initial_data(&facade, &config).await {
            log::error!("Seeding failed: {}", e);
            std::process::exit(1);
        }
    }

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let facade = web::Data::new(facade);
    let tokens = web::Data::new(tokens);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            // Application state
            .app_data(facade.clone())
            .app_data(tokens.clone())
            .app_data(config.clone())
            .app_data(handlers::json_config())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::configure)
    })
    .bind(&server_addr)?
    .run()
    .await
}
