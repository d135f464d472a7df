//! Example: receive signed Upay webhooks with axum
//!
//! Run with `UPAY_WEBHOOK_SECRET=... cargo run --example webhook_server`.

use axum::{body::Bytes, http::StatusCode};
use tracing::{info, warn};
use upay::{axum::webhook_router, webhook::parse_event, WebhookEventType};

async fn handle_event(body: Bytes) -> StatusCode {
    let event = match parse_event(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Failed to parse webhook event: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    match event.event_type {
        WebhookEventType::TransactionPaid => info!("Transaction paid: {}", event.data["id"]),
        WebhookEventType::TransactionRefunded => {
            info!("Transaction refunded: {}", event.data["id"])
        }
        other => info!("Received {:?} ({})", other, event.id),
    }

    StatusCode::OK
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let secret = std::env::var("UPAY_WEBHOOK_SECRET")?;
    let app = webhook_router("/webhooks/upay", handle_event, secret);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Listening for webhooks on http://0.0.0.0:3000/webhooks/upay");
    axum::serve(listener, app).await?;

    Ok(())
}
