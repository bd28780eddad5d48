//! # kbchat Answer Service Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the HTTP answer service behind `kbchat serve`. It
//! exposes the local retriever to remote clients (including
//! `kbchat ask --remote`):
//! - `POST /ask`: `{"question": "..."}` in, `{"answer": "..."}` out
//! - `GET /`: a welcome message, handy as a liveness check
//!
//! A blank question is rejected with `400 {"detail": "Question cannot be empty."}`.
//! Request bodies that are not JSON with a string `question` are rejected by
//! axum's `Json` extractor before the handler runs.
//!
//! ## Architecture
//!
//! The server implementation uses Axum and follows these steps:
//! 1. Bind the requested port, or the next free one if it is in use
//! 2. Build the router with tracing and (optionally) permissive CORS
//! 3. Serve until Ctrl+C or SIGTERM, then shut down gracefully
//!
//! The knowledge base is loaded once before serving and shared read-only
//! between requests through an `Arc`.
//!
use super::config::ServerConfig;
use crate::answer::{AskRequest, AskResponse, LocalSource};
use crate::core::error::{KbchatError, Result};
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

/// Body of `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Anna University RAG Chatbot API";

/// Consecutive ports tried before giving up.
const MAX_PORT_ATTEMPTS: u8 = 10;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
struct AppState {
    source: Arc<LocalSource>,
}

/// Error body in the shape `{"detail": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorDetail {
    detail: String,
}

/// # Run Answer Service (`run_server`)
///
/// Binds the service according to `config` and serves `source` until a
/// shutdown signal arrives.
///
/// ## Errors
///
/// This function can return errors if:
/// - None of the candidate ports can be bound.
/// - The Axum server itself encounters a fatal error.
pub async fn run_server(config: ServerConfig, source: LocalSource) -> Result<()> {
    let listener = bind_listener(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read the answer service address")?;
    let sentence_count = source.corpus().len();
    let app = create_app(Arc::new(source), config.enable_cors);

    println!("\n=================================================================");
    println!("📚 Knowledge base:    {} sentences", sentence_count);
    println!("🌐 Ask endpoint:      http://{}/ask", addr);
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");

    info!("Answer service listening on {}", addr);
    println!("Answer service running. Press Ctrl+C to stop.");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Answer service failed")?;

    println!("\nAnswer service stopped.");
    Ok(())
}

/// # Wait For Shutdown (`shutdown_signal`)
///
/// Resolves on Ctrl+C or, on Unix, SIGTERM. A signal that cannot be listened
/// for is logged and never fires.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    info!(
        "Received {}, stopping the answer service once in-flight requests finish",
        received
    );
}

/// # Bind Listener (`bind_listener`)
///
/// Binds `first_port` or, if it is taken, one of the ports right after it.
/// At most `attempts` ports are tried. The bound listener is returned so the
/// chosen port cannot be taken between probing and serving.
async fn bind_listener(host: IpAddr, first_port: u16, attempts: u8) -> Result<TcpListener> {
    for port in (first_port..=u16::MAX).take(usize::from(attempts)) {
        let addr = SocketAddr::new(host, port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if port != first_port {
                    info!(
                        "Port {} is busy, answer service uses port {} instead",
                        first_port, port
                    );
                }
                return Ok(listener);
            }
            Err(e) => warn!("Answer service cannot bind {}: {}", addr, e),
        }
    }

    anyhow::bail!(
        "No free port for the answer service on {} (tried {} port(s) from {})",
        host,
        attempts,
        first_port
    )
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router for the answer service around `source`.
pub fn create_app(source: Arc<LocalSource>, enable_cors: bool) -> Router {
    let cors_layer = if enable_cors {
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
        .route("/", get(read_root))
        .route("/ask", post(ask_question))
        .with_state(AppState { source })
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer),
        )
}

async fn read_root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> std::result::Result<Json<AskResponse>, (StatusCode, Json<ErrorDetail>)> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorDetail {
                detail: KbchatError::EmptyQuestion.to_string(),
            }),
        ));
    }

    let answer = state.source.answer_now(question);
    Ok(Json(AskResponse { answer }))
}
