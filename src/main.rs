mod assistant;
mod config;
mod error;
mod mail;
mod routes;
mod services;
mod settings;
mod state;

use assistant::AssistantTiming;
use mail::Mailer;
use mail::config::MailConfig;
use services::session::SessionStore;
use settings::SettingsStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let server = config::ServerConfig::from_env().expect("invalid server config");
    let timing = AssistantTiming::from_env();

    let mailer = Mailer::from_config(MailConfig::from_env(), timing.report_delay).expect("mail transport init failed");
    if mailer.transport_name() == "log" {
        tracing::warn!("no email service configured; sends will be simulated");
    } else {
        tracing::info!(transport = mailer.transport_name(), "mail transport initialized");
    }

    let state = state::AppState::new(SessionStore::from_env(), SettingsStore::from_env(), mailer, timing);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", server.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = server.port, "dashboard assistant listening");
    axum::serve(listener, app).await.expect("server failed");
}
