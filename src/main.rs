use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use picshare_service::handlers;
use picshare_service::middleware;
use picshare_service::openapi::ApiDoc;
use picshare_service::security::jwt;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn health_summary(pool: web::Data<sqlx::PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "picshare-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "picshare-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// Picshare Service
///
/// Backend for a photo-sharing social application.
///
/// # Routes
///
/// - `/api/v1/signup`, `/api/v1/login` - Account creation and token issuance (public)
/// - `/api/v1/post/*` - Create, read, search, delete posts
/// - `/api/v1/comment/*` - Create, read, delete comments
/// - `/api/v1/like/*`, `/api/v1/save/*`, `/api/v1/follow/*` - Social edges
/// - `/api/v1/feed` - Timeline of followed authors plus self
/// - `/api/v1/users/{id}` - Profile view and update
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match picshare_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting picshare-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    if let Err(e) = jwt::initialize_jwt_keys(
        &config.auth.jwt_private_key_pem,
        &config.auth.jwt_public_key_pem,
    ) {
        tracing::error!("JWT key initialization failed: {}", e);
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize JWT keys: {e}"),
        ));
    }

    let db_pool = match picshare_service::db::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::error!("Database migration failed: {}", e);
        eprintln!("ERROR: Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Connected to database and applied migrations");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(openapi_doc.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api/v1/openapi.json", openapi_doc.clone()),
            )
            .route("/api/v1/openapi.json", web::get().to(openapi_json))
            .app_data(web::Data::new(db_pool.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .route("/api/v1/signup", web::post().to(handlers::signup))
            .route("/api/v1/login", web::post().to(handlers::login))
            .service(
                web::scope("/api/v1")
                    .wrap(middleware::JwtAuthMiddleware)
                    .wrap(middleware::TimingMiddleware)
                    .service(
                        web::scope("/post")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_posts))
                                    .route(web::post().to(handlers::create_post)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::get_post))
                                    .route(web::delete().to(handlers::delete_post)),
                            ),
                    )
                    .service(
                        web::scope("/postsearch")
                            .route("", web::get().to(handlers::search_posts)),
                    )
                    .service(
                        web::scope("/comment")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_comments))
                                    .route(web::post().to(handlers::create_comment)),
                            )
                            .service(
                                web::resource("/{comment_id}")
                                    .route(web::get().to(handlers::get_comment))
                                    .route(web::delete().to(handlers::delete_comment)),
                            ),
                    )
                    .service(
                        web::scope("/like")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_likes))
                                    .route(web::post().to(handlers::create_like)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::delete().to(handlers::delete_like)),
                            ),
                    )
                    .service(
                        web::scope("/save")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_saves))
                                    .route(web::post().to(handlers::create_save)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::delete().to(handlers::delete_save)),
                            ),
                    )
                    .service(
                        web::scope("/follow")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_follows))
                                    .route(web::post().to(handlers::create_follow)),
                            )
                            .service(
                                web::resource("/{following_id}")
                                    .route(web::delete().to(handlers::delete_follow)),
                            ),
                    )
                    .service(web::scope("/feed").route("", web::get().to(handlers::get_feed)))
                    .service(
                        web::scope("/users").service(
                            web::resource("/{user_id}")
                                .route(web::get().to(handlers::get_profile))
                                .route(web::patch().to(handlers::update_profile)),
                        ),
                    ),
            )
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("picshare-service listening on {}", bind_address);

    server.await
}
