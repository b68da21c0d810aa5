use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use serde_json::json;
use tokio::sync::oneshot;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::Filter;
use crate::config::constants::{
    DEFAULT_SERVER_PORT_RANGE_END, DEFAULT_SERVER_PORT_RANGE_START, MAX_SESSION_TOKEN_LENGTH,
    PANEL_TOKEN_HEADER, SERVER_SHUTDOWN_GRACE_PERIOD_MS, sleep_duration_millis,
};
use crate::enums::notice_level::NoticeLevel;
use crate::enums::panel_event::PanelEvent;
use crate::enums::panel_message::PanelMessage;
use crate::errors::{ReviewError, ReviewResult};
use crate::helpers::template::escape_html;
use crate::structs::panel_reply::PanelReply;
use crate::ui::panel_controller::PanelController;

const MAX_MESSAGE_BYTES: u64 = 1024 * 1024;

/// Serves the settings panel on 127.0.0.1.
pub struct PanelServer {
    controller: Arc<PanelController>,
    session_token: String,
    port: Option<u16>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl PanelServer {
    pub fn new(controller: Arc<PanelController>) -> Self {
        Self {
            controller,
            session_token: Uuid::new_v4().to_string(),
            port: None,
            shutdown_tx: None,
        }
    }

    pub fn url(&self) -> Option<String> {
        self.port.map(|port| format!("http://127.0.0.1:{port}/"))
    }

    pub async fn start(&mut self, preferred_port: Option<u16>) -> ReviewResult<u16> {
        let port = match preferred_port {
            Some(port) => port,
            None => find_available_port().await?,
        };
        self.port = Some(port);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let routes = panel_routes(Arc::clone(&self.controller), self.session_token.clone());

        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let (_, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(addr, async {
                shutdown_rx.await.ok();
            })
            .map_err(|e| ReviewError::system_error("panel server start", &e.to_string()))?;

        tokio::spawn(server);

        log::info!("🌐 Panel server started on port {port}");
        Ok(port)
    }

    pub async fn shutdown(&mut self) -> ReviewResult<()> {
        log::info!("🛑 Shutting down panel server...");

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx
                .send(())
                .map_err(|()| ReviewError::system_error("shutdown", "Failed to send shutdown signal"))?;
        }

        tokio::time::sleep(sleep_duration_millis(SERVER_SHUTDOWN_GRACE_PERIOD_MS)).await;
        log::info!("✅ Panel server shutdown complete");

        Ok(())
    }
}

fn panel_routes(
    controller: Arc<PanelController>,
    session_token: String,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let controller_filter = warp::any().map(move || Arc::clone(&controller));
    let token_filter = warp::any().map(move || session_token.clone());

    let panel_page = warp::path::end()
        .and(warp::get())
        .and(controller_filter.clone())
        .and(token_filter.clone())
        .and_then(serve_panel_page);

    let message = warp::path!("api" / "message")
        .and(warp::post())
        .and(warp::header::optional::<String>(PANEL_TOKEN_HEADER))
        .and(warp::body::content_length_limit(MAX_MESSAGE_BYTES))
        .and(warp::body::json())
        .and(controller_filter)
        .and(token_filter)
        .and_then(message_handler);

    panel_page.or(message)
}

async fn find_available_port() -> ReviewResult<u16> {
    for port in DEFAULT_SERVER_PORT_RANGE_START..DEFAULT_SERVER_PORT_RANGE_END {
        if let Ok(listener) = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}")).await {
            drop(listener);
            return Ok(port);
        }
    }
    Err(ReviewError::system_error(
        "panel server start",
        &format!("no free port in {DEFAULT_SERVER_PORT_RANGE_START}..{DEFAULT_SERVER_PORT_RANGE_END}"),
    ))
}

/// Rendered fresh on every request so the page always reflects the store.
async fn serve_panel_page(
    controller: Arc<PanelController>,
    session_token: String,
) -> Result<warp::reply::WithStatus<warp::reply::Html<String>>, Infallible> {
    match controller.render(&session_token) {
        Ok(html) => Ok(warp::reply::with_status(warp::reply::html(html), StatusCode::OK)),
        Err(e) => {
            log::error!("❌ Failed to render panel: {e}");
            let body = format!("<p>Failed to load settings: {}</p>", escape_html(&e.user_message()));
            Ok(warp::reply::with_status(warp::reply::html(body), StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

fn sanitize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(MAX_SESSION_TOKEN_LENGTH)
        .collect()
}

async fn message_handler(
    token: Option<String>,
    body: serde_json::Value,
    controller: Arc<PanelController>,
    session_token: String,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, Infallible> {
    let presented = token.as_deref().map(sanitize_token).unwrap_or_default();
    if presented != session_token {
        log::warn!("⚠️ Rejected panel message with a missing or stale session token");
        return Ok(warp::reply::with_status(
            warp::reply::json(&json!({
                "error": "Invalid panel session; reload the page"
            })),
            StatusCode::FORBIDDEN,
        ));
    }

    let message: PanelMessage = match serde_json::from_value(body) {
        Ok(message) => message,
        Err(e) => {
            let error = ReviewError::from(e);
            let reply = PanelReply {
                events: vec![PanelEvent::Notice {
                    level: NoticeLevel::Error,
                    message: error.user_message(),
                }],
            };
            return Ok(warp::reply::with_status(warp::reply::json(&reply), StatusCode::BAD_REQUEST));
        }
    };

    log::debug!("📨 Panel message: {message:?}");
    let reply = PanelReply {
        events: controller.handle(message).await,
    };
    Ok(warp::reply::with_status(warp::reply::json(&reply), StatusCode::OK))
}
