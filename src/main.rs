use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use serenia_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::StripeService,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    tasks,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml()?;

    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    let stripe_service = StripeService::new(config.stripe.clone());

    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let user_service = UserService::new(pool.clone());
    let wallet_service = WalletService::new(pool.clone());
    let promotion_service = PromotionService::new(pool.clone());
    let notification_service = NotificationService::new(pool.clone());
    let catalog_service = CatalogService::new(pool.clone());
    let room_service = RoomService::new(pool.clone());
    let review_service = ReviewService::new(pool.clone());
    let stats_service = StatsService::new(pool.clone());
    let payment_service = PaymentService::new(
        pool.clone(),
        stripe_service.clone(),
        wallet_service.clone(),
        promotion_service.clone(),
        notification_service.clone(),
    );
    let course_service = CourseService::new(
        pool.clone(),
        payment_service.clone(),
        notification_service.clone(),
    );
    let appointment_service = AppointmentService::new(
        pool.clone(),
        course_service.clone(),
        payment_service.clone(),
        notification_service.clone(),
        config.booking.cancellation_cutoff_hours,
    );

    // Course lifecycle sweep: once now, then daily
    tasks::spawn_all(
        course_service.clone(),
        config.booking.session_overdue_grace_hours,
    );

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let server_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(wallet_service.clone()))
            .app_data(web::Data::new(promotion_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(room_service.clone()))
            .app_data(web::Data::new(review_service.clone()))
            .app_data(web::Data::new(stats_service.clone()))
            .app_data(web::Data::new(payment_service.clone()))
            .app_data(web::Data::new(course_service.clone()))
            .app_data(web::Data::new(appointment_service.clone()))
            .app_data(web::Data::new(stripe_service.clone()))
            .configure(swagger_config)
            .configure(handlers::webhook_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::user_config)
                    .configure(handlers::wallet_config)
                    .configure(handlers::catalog_config)
                    .configure(handlers::appointment_config)
                    .configure(handlers::payment_config)
                    .configure(handlers::promotion_config)
                    .configure(handlers::review_config)
                    .configure(handlers::notification_config)
                    .configure(handlers::course_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
