use anyhow::Context;
use lambda_http::{
    http::{
        header::{ALLOW, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    Body, Request, Response,
};
use lambda_runtime::tracing;
use serde_json::{json, Value};

use crate::{
    card::CardEmailRequest,
    config::Config,
    error::SendCardError,
    upstream::{ResendEmail, Upstream},
};

/// Runs one card email through the pipeline and always produces a response;
/// failures are rendered as JSON error bodies rather than bubbled to the runtime.
pub async fn handle<U, C>(event: Request, upstream: &U, load_config: C) -> Response<Body>
where
    U: Upstream,
    C: FnOnce() -> Result<Config, SendCardError>,
{
    if event.method() != Method::POST {
        let mut resp = json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &json!({ "ok": false, "error": "Method Not Allowed" }),
        );
        resp.headers_mut().insert(ALLOW, HeaderValue::from_static("POST"));
        return resp;
    }

    match send_card_email(&event, upstream, load_config).await {
        Ok(reply) => json_response(StatusCode::OK, &json!({ "ok": true, "resend": reply })),
        Err(e) => {
            match &e {
                SendCardError::Internal(_) | SendCardError::Provider { .. } => {
                    tracing::error!("failed to send card email :: {e}");
                }
                _ => tracing::warn!("rejected card email :: {e}"),
            }
            json_response(e.status(), &e.body())
        }
    }
}

async fn send_card_email<U, C>(
    event: &Request,
    upstream: &U,
    load_config: C,
) -> Result<Value, SendCardError>
where
    U: Upstream,
    C: FnOnce() -> Result<Config, SendCardError>,
{
    let request: CardEmailRequest =
        serde_json::from_slice(event.body().as_ref()).context("invalid request body")?;
    let card = request.validate()?;
    let config = load_config()?;
    tracing::info!("sending card email :: {}", card.card_name);

    let image = upstream.fetch_image(&card.card_image_url).await?;
    let email = ResendEmail::new(&config.from, &card, &image);
    let reply = upstream.send_email(&config, &email).await?;
    tracing::info!("card email accepted by resend");

    Ok(reply)
}

fn json_response(status: StatusCode, body: &Value) -> Response<Body> {
    let mut resp = Response::new(Body::from(body.to_string()));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    resp
}
