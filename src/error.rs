use lambda_http::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SendCardError {
    #[error("Missing fields: to, cardName, cardImageUrl")]
    MissingFields,

    #[error("Missing {0} env var")]
    MissingConfig(&'static str),

    #[error("Image fetch failed: {}", .status.as_u16())]
    ImageFetch { status: StatusCode, url: String },

    #[error("Resend error")]
    Provider { status: StatusCode, detail: String },

    #[error("Server error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl SendCardError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::ImageFetch { .. } => StatusCode::BAD_REQUEST,
            Self::MissingConfig(_) | Self::Provider { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Value {
        let mut body = json!({ "ok": false, "error": self.to_string() });
        match self {
            Self::ImageFetch { url, .. } => body["url"] = json!(url),
            Self::Provider { status, detail } => {
                body["status"] = json!(status.as_u16());
                body["detail"] = json!(detail);
            }
            _ => {}
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn image_failure_reports_upstream_status_and_url() {
        let err = SendCardError::ImageFetch {
            status: StatusCode::NOT_FOUND,
            url: "https://cdn.example/card.jpg".into(),
        };

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            json!({
                "ok": false,
                "error": "Image fetch failed: 404",
                "url": "https://cdn.example/card.jpg",
            })
        );
    }

    #[test]
    fn provider_failure_carries_status_and_detail() {
        let err = SendCardError::Provider {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: r#"{"message":"invalid from"}"#.into(),
        };

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body(),
            json!({
                "ok": false,
                "error": "Resend error",
                "status": 422,
                "detail": r#"{"message":"invalid from"}"#,
            })
        );
    }

    #[test]
    fn internal_errors_show_the_context_chain() {
        let err: SendCardError = anyhow::anyhow!("connection refused")
            .context("image request failed")
            .into();

        assert_eq!(
            err.to_string(),
            "Server error: image request failed: connection refused"
        );
    }
}
