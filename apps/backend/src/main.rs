use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use wordwolf::config::app::Config;
use wordwolf::config::game::GameRules;
use wordwolf::infra::state::build_state;
use wordwolf::middleware::RequestTrace;
use wordwolf::routes;
use wordwolf::state::security_config::SecurityConfig;
use wordwolf::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let rules = match GameRules::from_env() {
        Ok(rules) => rules,
        Err(e) => {
            error!(error = %e, "invalid game rules");
            std::process::exit(1);
        }
    };

    let security_config = SecurityConfig::new(config.jwt_secret.as_bytes())
        .with_password_salt(config.password_salt.as_bytes());

    let app_state = match build_state()
        .with_db(config.db_profile.clone())
        .with_security(security_config)
        .with_rules(rules)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "starting word-wolf backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
