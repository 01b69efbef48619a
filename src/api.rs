//! HTTP client for the booking and contact endpoints
//!
//! The UI loop never blocks on the network: requests go to a background
//! thread running a small tokio runtime, and results come back as
//! events drained at the top of each tick. Only the calendar and
//! contact widgets talk to this module.

use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::slots::{BookingRequest, BookingResponse, Slot};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned status {0}")]
    Status(u16),
}

/// Contact form payload for `POST /contact`.
#[derive(Debug, Clone, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiRequest {
    FetchSlots,
    Book(BookingRequest),
    SendContact(ContactPayload),
}

/// Results delivered back to the UI loop. Booking errors carry the
/// inline message the widget renders; there is no retry path.
#[derive(Debug)]
pub enum ApiEvent {
    Slots(Result<Vec<Slot>, ApiError>),
    Booked(Result<(), String>),
    ContactSent(Result<(), ApiError>),
}

/// Cheap cloneable sender for the widgets.
#[derive(Debug, Clone)]
pub struct ApiHandle {
    tx: mpsc::UnboundedSender<ApiRequest>,
}

impl ApiHandle {
    pub fn fetch_slots(&self) {
        let _ = self.tx.send(ApiRequest::FetchSlots);
    }

    pub fn book(&self, request: BookingRequest) {
        let _ = self.tx.send(ApiRequest::Book(request));
    }

    pub fn send_contact(&self, payload: ContactPayload) {
        let _ = self.tx.send(ApiRequest::SendContact(payload));
    }

    /// Handle wired to nothing; requests are dropped and no events ever
    /// arrive. For widget tests.
    #[cfg(test)]
    pub fn disconnected() -> (Self, std_mpsc::Receiver<ApiEvent>) {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (_event_tx, event_rx) = std_mpsc::channel();
        (Self { tx }, event_rx)
    }
}

/// Start the API thread. Events arrive on the returned receiver; the
/// thread exits when the handle (and all clones) drop.
pub fn spawn(base_url: String) -> (ApiHandle, std_mpsc::Receiver<ApiEvent>) {
    let (req_tx, mut req_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = std_mpsc::channel();

    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                tracing::error!("failed to start api runtime: {}", err);
                return;
            }
        };

        runtime.block_on(async move {
            let client = match reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
            {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!("failed to build http client: {}", err);
                    return;
                }
            };

            while let Some(request) = req_rx.recv().await {
                let event = handle_request(&client, &base_url, request).await;
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });
    });

    (ApiHandle { tx: req_tx }, event_rx)
}

async fn handle_request(client: &reqwest::Client, base: &str, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::FetchSlots => ApiEvent::Slots(fetch_slots(client, base).await),
        ApiRequest::Book(body) => ApiEvent::Booked(book(client, base, body).await),
        ApiRequest::SendContact(payload) => {
            ApiEvent::ContactSent(send_contact(client, base, payload).await)
        }
    }
}

async fn fetch_slots(client: &reqwest::Client, base: &str) -> Result<Vec<Slot>, ApiError> {
    let response = client
        .get(format!("{}/api/slots", base))
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !response.status().is_success() {
        return Err(ApiError::Status(response.status().as_u16()));
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))
}

async fn book(client: &reqwest::Client, base: &str, body: BookingRequest) -> Result<(), String> {
    let response = client
        .post(format!("{}/api/book", base))
        .json(&body)
        .send()
        .await;
    match response {
        Ok(response) => {
            let ok = response.status().is_success();
            let reply: BookingResponse = response.json().await.unwrap_or_default();
            if ok {
                Ok(())
            } else {
                Err(reply
                    .message
                    .unwrap_or_else(|| "Booking failed. Please try again.".to_string()))
            }
        }
        Err(err) => {
            tracing::warn!("booking request failed: {}", err);
            Err("An error occurred. Please try again.".to_string())
        }
    }
}

async fn send_contact(
    client: &reqwest::Client,
    base: &str,
    payload: ContactPayload,
) -> Result<(), ApiError> {
    let response = client
        .post(format!("{}/contact", base))
        .form(&payload)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if response.status().is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(response.status().as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_messages() {
        let err = ApiError::Status(503);
        assert_eq!(err.to_string(), "server returned status 503");
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[test]
    fn test_contact_payload_field_names() {
        let payload = ContactPayload {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello there, a real message.".to_string(),
        };
        // Field names are what the endpoint expects.
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["email"], "ada@example.com");
        assert!(value["message"].is_string());
    }
}
