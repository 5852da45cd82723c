//! # CharcuBot HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the JSON API behind `charcubot srv`:
//! - Chat and menu-selection endpoints backed by a shared `Chatbot`
//! - Port availability checking with automatic fallback
//! - CORS configuration and request tracing
//! - Graceful shutdown handling
//!
//! ## Architecture
//!
//! 1. Find an available port if the requested one is in use
//! 2. Build the Axum router with the chatbot as shared state
//! 3. Start the server with graceful shutdown handlers
//!
use super::config::ServerConfig;
use crate::core::error::Result;
use crate::responses::chatbot::{Chatbot, Reply};
use anyhow::Context;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, warn, Level};

type SharedBot = Arc<Chatbot>;

#[derive(Deserialize, Debug)]
struct ChatRequest {
    message: String,
}

#[derive(Deserialize, Debug)]
struct SelectRequest {
    label: String,
}

#[derive(Serialize, Debug)]
struct ReplyBody {
    /// `None` when the message was blank.
    reply: Option<String>,
    end: bool,
}

impl From<Option<Reply>> for ReplyBody {
    fn from(reply: Option<Reply>) -> Self {
        match reply {
            Some(reply) => Self {
                reply: Some(reply.text),
                end: reply.end,
            },
            None => Self {
                reply: None,
                end: false,
            },
        }
    }
}

#[derive(Serialize, Debug)]
struct MenuEntry {
    label: String,
}

#[derive(Serialize, Debug)]
struct OptionsBody {
    bot: String,
    welcome: String,
    degraded: bool,
    options: Vec<MenuEntry>,
}

#[derive(Serialize, Debug)]
struct HealthBody {
    status: &'static str,
    options: usize,
    degraded: bool,
}

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port starting at `config.port`, prints the connection
/// details, and serves the chatbot API until Ctrl+C or SIGTERM.
///
/// ## Errors
///
/// - No available port within the allowed attempts.
/// - Binding the `TcpListener` fails (e.g., permissions).
/// - The Axum server itself encounters a fatal error.
pub async fn run_server(config: ServerConfig, bot: Chatbot) -> Result<()> {
    let max_port_attempts = 10;
    let addr = find_available_port(config.host, config.port, max_port_attempts).await?;

    let option_count = bot.responses().options.len();
    let degraded = bot.is_degraded();
    let app = create_app(&config, Arc::new(bot));

    println!("\n=================================================================");
    println!("🦃 CharcuBot API:      http://{}", addr);
    println!("💬 Options loaded:    {}", option_count);
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");
    if degraded {
        warn!("Serving without options; every reply will be the load error message.");
    }

    info!("Starting server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C (or SIGTERM on Unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and then consecutive ports, up to `max_attempts` in total.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);

        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(port) => port,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router with the chatbot as shared state, plus tracing and CORS layers.
fn create_app(config: &ServerConfig, bot: SharedBot) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health))
        .route("/options", get(list_options))
        .route("/chat", post(chat))
        .route("/select", post(select))
        .with_state(bot)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer),
        )
}

async fn health(State(bot): State<SharedBot>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        options: bot.responses().options.len(),
        degraded: bot.is_degraded(),
    })
}

async fn list_options(State(bot): State<SharedBot>) -> Json<OptionsBody> {
    let degraded = bot.is_degraded();
    let welcome = if degraded {
        bot.unavailable_message()
    } else {
        bot.welcome()
    };
    Json(OptionsBody {
        bot: bot.name().to_string(),
        welcome: welcome.to_string(),
        degraded,
        options: bot
            .menu()
            .into_iter()
            .map(|option| MenuEntry {
                label: option.label.clone(),
            })
            .collect(),
    })
}

async fn chat(State(bot): State<SharedBot>, Json(request): Json<ChatRequest>) -> Json<ReplyBody> {
    debug!("Chat message: {:?}", request.message);
    let reply = bot.reply(&request.message, &mut rand::thread_rng());
    Json(reply.into())
}

async fn select(
    State(bot): State<SharedBot>,
    Json(request): Json<SelectRequest>,
) -> Json<ReplyBody> {
    debug!("Menu selection: {:?}", request.label);
    let reply = bot.select(&request.label, &mut rand::thread_rng());
    Json(Some(reply).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BotConfig;
    use crate::responses::{BotOption, ResponseConfig, LOAD_ERROR_RESPONSE};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::net::Ipv4Addr;
    use tower::ServiceExt;

    fn test_config() -> ServerConfig {
        ServerConfig {
            port: 0,
            host: Ipv4Addr::LOCALHOST.into(),
            enable_cors: true,
        }
    }

    fn test_bot() -> SharedBot {
        let responses = ResponseConfig {
            options: vec![
                BotOption {
                    label: "Jamón Ibérico".into(),
                    keywords: vec!["jamón".into()],
                    responses: vec!["Jamón de bellota a 89 €/kg.".into()],
                },
                BotOption {
                    label: "Quesos".into(),
                    keywords: vec!["queso".into()],
                    responses: vec!["Manchego curado.".into()],
                },
            ],
            default_responses: vec!["No te he entendido.".into()],
        };
        Arc::new(Chatbot::new(responses, &BotConfig::default()))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_find_available_port_start_is_free() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 50000;

        let addr = find_available_port(host, start_port, 5).await?;

        assert_eq!(addr.port(), start_port);
        assert_eq!(addr.ip(), host);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_port_start_occupied() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 51000;

        let _listener = TcpListener::bind(SocketAddr::new(host, start_port)).await?;

        let addr = find_available_port(host, start_port, 5).await?;

        assert!(addr.port() > start_port);
        assert!(addr.port() < start_port + 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(create_app(&test_config(), test_bot()), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "options": 2, "degraded": false}));
    }

    #[tokio::test]
    async fn test_options_lists_menu() {
        let (status, body) = send(create_app(&test_config(), test_bot()), get_request("/options")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bot"], "CharcuBot");
        assert_eq!(body["degraded"], false);
        assert_eq!(
            body["options"],
            json!([{"label": "Jamón Ibérico"}, {"label": "Quesos"}])
        );
    }

    #[tokio::test]
    async fn test_chat_keyword_reply() {
        let app = create_app(&test_config(), test_bot());
        let (status, body) = send(app, post_json("/chat", json!({"message": "¿Hay QUESO?"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"reply": "Manchego curado.", "end": false}));
    }

    #[tokio::test]
    async fn test_chat_blank_and_exit() {
        let app = create_app(&test_config(), test_bot());
        let (_, body) = send(app.clone(), post_json("/chat", json!({"message": "  "}))).await;
        assert_eq!(body, json!({"reply": null, "end": false}));

        let (_, body) = send(app, post_json("/chat", json!({"message": "salir"}))).await;
        assert_eq!(body["end"], true);
        assert_eq!(body["reply"], BotConfig::default().farewell);
    }

    #[tokio::test]
    async fn test_select_by_label() {
        let app = create_app(&test_config(), test_bot());
        let (_, body) = send(app.clone(), post_json("/select", json!({"label": "QUESOS"}))).await;
        assert_eq!(body, json!({"reply": "Manchego curado.", "end": false}));

        let (_, body) = send(app, post_json("/select", json!({"label": "Pan"}))).await;
        assert_eq!(body["reply"], "No te he entendido.");
    }

    #[tokio::test]
    async fn test_chat_rejects_bad_body() {
        let app = create_app(&test_config(), test_bot());
        let (status, _) = send(app, post_json("/chat", json!({"text": "jamón"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_degraded_bot_reports_error() {
        let bot = Arc::new(Chatbot::new(ResponseConfig::degraded(), &BotConfig::default()));
        let app = create_app(&test_config(), bot);

        let (_, body) = send(app.clone(), get_request("/options")).await;
        assert_eq!(body["degraded"], true);
        assert_eq!(body["welcome"], LOAD_ERROR_RESPONSE);
        assert_eq!(body["options"], json!([]));

        let (_, body) = send(app, post_json("/chat", json!({"message": "jamón"}))).await;
        assert_eq!(body["reply"], LOAD_ERROR_RESPONSE);
    }
}
