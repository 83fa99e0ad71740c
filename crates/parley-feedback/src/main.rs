use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use serde_json::json;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use parley_core::models::feedback::FeedbackSubmission;
use parley_core::settings::Settings;
use parley_feedback::error::FeedbackError;
use parley_feedback::send_feedback_email;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let settings = Settings::from_env();
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.aws_region.clone()))
        .load()
        .await;

    run(service_fn(|event: Request| {
        handle(&config, &settings, event)
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}

async fn handle(
    config: &aws_config::SdkConfig,
    settings: &Settings,
    event: Request,
) -> Result<Response<Body>, Error> {
    if event.method() == Method::OPTIONS {
        return json_response(StatusCode::OK, json!({"message": "CORS preflight"}));
    }
    if event.method() != Method::POST {
        return json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            json!({"error": "Method not allowed"}),
        );
    }

    let submission: FeedbackSubmission = match serde_json::from_slice(event.body()) {
        Ok(submission) => submission,
        Err(e) => {
            warn!(error = %e, "rejecting unparseable feedback body");
            return json_response(
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid JSON in request body"}),
            );
        }
    };

    match send_feedback_email(config, settings, &submission).await {
        Ok(message_id) => json_response(
            StatusCode::OK,
            json!({"message": "Feedback submitted successfully", "messageId": message_id}),
        ),
        Err(e) if e.is_validation() => {
            json_response(StatusCode::BAD_REQUEST, json!({"error": e.to_string()}))
        }
        Err(FeedbackError::MissingEmailConfig) => {
            error!("feedback email sender or recipient not configured");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Email configuration missing"}),
            )
        }
        Err(e) => {
            error!(error = %e, "feedback email send failed");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error"}),
            )
        }
    }
}

/// Every response carries the CORS headers the feedback form relies on.
fn json_response(status: StatusCode, body: serde_json::Value) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("access-control-allow-origin", "*")
        .header("access-control-allow-headers", "Content-Type")
        .header("access-control-allow-methods", "POST, OPTIONS")
        .body(Body::from(body.to_string()))
        .map_err(Box::new)?;
    Ok(response)
}
