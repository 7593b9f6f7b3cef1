// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Typed manifest endpoints on top of a [`Transport`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Method, Transport, TransportError};
use crate::models::manifest::{Manifest, ManifestId};

const COLLECTION: [&str; 2] = ["api", "romaneios"];

/// Failures that never reached a well-formed server verdict.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Body was not the JSON shape we expect (HTTP status attached).
    #[error("unexpected response (HTTP {status}): {detail}")]
    Parse { status: u16, detail: String },
    /// Server answered `success: false` on a read endpoint.
    #[error("{0}")]
    Rejected(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
}

/// Body of `POST /api/romaneios`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewManifest {
    pub pedido_compra: String,
    pub nota_fiscal: String,
    pub chave_acesso: String,
}

/// Reply to `POST /api/romaneios`.
#[derive(Debug, Deserialize)]
pub struct CreateResponse {
    pub success: bool,
    #[serde(default)]
    pub romaneio: Option<Manifest>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyResult {
    pub mensagem: String,
}

/// Body of `POST /api/romaneios/{id}/verificar`.
#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(default)]
    pub resultado: Option<VerifyResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `DELETE /api/romaneios/{id}`.
#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    success: bool,
    #[serde(default)]
    romaneios: Vec<Manifest>,
    #[serde(default)]
    error: Option<String>,
}

/// Settled result of a verify/delete request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Server reported success; `message` is the server text when it sends one.
    Succeeded { message: Option<String> },
    /// Well-formed payload with `success: false`.
    Failed { error: String },
    /// Request or parse failure.
    Errored { reason: String },
}

const UNKNOWN_ERROR: &str = "unknown error";

impl From<Result<VerifyResponse, ApiError>> for ActionOutcome {
    fn from(result: Result<VerifyResponse, ApiError>) -> Self {
        match result {
            Ok(VerifyResponse {
                success: true,
                resultado: Some(res),
                ..
            }) => ActionOutcome::Succeeded {
                message: Some(res.mensagem),
            },
            // A success flag without the result block cannot be displayed.
            Ok(VerifyResponse {
                success: true,
                resultado: None,
                ..
            }) => ActionOutcome::Errored {
                reason: "response is missing resultado.mensagem".into(),
            },
            Ok(VerifyResponse { error, .. }) => ActionOutcome::Failed {
                error: error.unwrap_or_else(|| UNKNOWN_ERROR.into()),
            },
            Err(err) => ActionOutcome::Errored {
                reason: err.to_string(),
            },
        }
    }
}

impl From<Result<CreateResponse, ApiError>> for ActionOutcome {
    fn from(result: Result<CreateResponse, ApiError>) -> Self {
        match result {
            Ok(CreateResponse {
                success: true,
                romaneio,
                ..
            }) => ActionOutcome::Succeeded {
                message: romaneio.map(|m| m.id.to_string()),
            },
            Ok(CreateResponse { error, .. }) => ActionOutcome::Failed {
                error: error.unwrap_or_else(|| UNKNOWN_ERROR.into()),
            },
            Err(err) => ActionOutcome::Errored {
                reason: err.to_string(),
            },
        }
    }
}

impl From<Result<DeleteResponse, ApiError>> for ActionOutcome {
    fn from(result: Result<DeleteResponse, ApiError>) -> Self {
        match result {
            Ok(DeleteResponse { success: true, .. }) => ActionOutcome::Succeeded { message: None },
            Ok(DeleteResponse { error, .. }) => ActionOutcome::Failed {
                error: error.unwrap_or_else(|| UNKNOWN_ERROR.into()),
            },
            Err(err) => ActionOutcome::Errored {
                reason: err.to_string(),
            },
        }
    }
}

/// Manifest endpoints. Generic so tests can swap the transport.
pub struct ManifestApi<T: Transport> {
    transport: T,
}

impl<T: Transport> ManifestApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ask the server to re-check a manifest against the counting API.
    pub fn verify(&self, id: &ManifestId) -> Result<VerifyResponse, ApiError> {
        let [api, collection] = COLLECTION;
        self.call(
            Method::Post,
            &[api, collection, id.as_str(), "verificar"],
            None,
        )
    }

    pub fn delete(&self, id: &ManifestId) -> Result<DeleteResponse, ApiError> {
        let [api, collection] = COLLECTION;
        self.call(Method::Delete, &[api, collection, id.as_str()], None)
    }

    /// Register a new manifest; the server validates and stores it as pending.
    pub fn create(&self, manifest: &NewManifest) -> Result<CreateResponse, ApiError> {
        let body = serde_json::to_value(manifest).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.call(Method::Post, &COLLECTION, Some(&body))
    }

    /// Fetch the full manifest table.
    pub fn list(&self) -> Result<Vec<Manifest>, ApiError> {
        let resp: ListResponse = self.call(Method::Get, &COLLECTION, None)?;
        if resp.success {
            Ok(resp.romaneios)
        } else {
            Err(ApiError::Rejected(
                resp.error.unwrap_or_else(|| UNKNOWN_ERROR.into()),
            ))
        }
    }

    fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&serde_json::Value>,
    ) -> Result<R, ApiError> {
        let response = self.transport.request(method, segments, body)?;
        // The payload decides success, not the status code.
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse {
            status: response.status,
            detail: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;

    #[test]
    fn verify_posts_to_manifest_endpoint() {
        let api = ManifestApi::new(FakeTransport::replying_json(
            200,
            r#"{"success": true, "resultado": {"mensagem": "ok"}}"#,
        ));

        let outcome = ActionOutcome::from(api.verify(&ManifestId::new("77")));

        assert_eq!(
            outcome,
            ActionOutcome::Succeeded {
                message: Some("ok".into())
            }
        );
        assert_eq!(
            api.transport().calls(),
            vec![(Method::Post, "/api/romaneios/77/verificar".to_string())]
        );
    }

    #[test]
    fn verify_failure_payload_is_business_failure_even_on_4xx() {
        let api = ManifestApi::new(FakeTransport::replying_json(
            400,
            r#"{"success": false, "error": "Romaneio finalizado"}"#,
        ));

        let outcome = ActionOutcome::from(api.verify(&ManifestId::new("3")));

        assert_eq!(
            outcome,
            ActionOutcome::Failed {
                error: "Romaneio finalizado".into()
            }
        );
    }

    #[test]
    fn verify_success_without_result_is_an_error() {
        let api = ManifestApi::new(FakeTransport::replying_json(200, r#"{"success": true}"#));

        let outcome = ActionOutcome::from(api.verify(&ManifestId::new("3")));

        assert!(matches!(outcome, ActionOutcome::Errored { .. }));
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        let api = ManifestApi::new(FakeTransport::replying_json(
            500,
            "<html>Internal Server Error</html>",
        ));

        let err = api.delete(&ManifestId::new("5")).unwrap_err();

        assert!(matches!(err, ApiError::Parse { status: 500, .. }));
    }

    #[test]
    fn delete_uses_delete_method_and_ignores_server_text_on_success() {
        let api = ManifestApi::new(FakeTransport::replying_json(
            200,
            r#"{"success": true, "message": "Romaneio excluído"}"#,
        ));

        let outcome = ActionOutcome::from(api.delete(&ManifestId::new("5")));

        assert_eq!(outcome, ActionOutcome::Succeeded { message: None });
        assert_eq!(
            api.transport().calls(),
            vec![(Method::Delete, "/api/romaneios/5".to_string())]
        );
    }

    #[test]
    fn transport_failure_becomes_errored_outcome() {
        let api = ManifestApi::new(FakeTransport::failing("connection refused"));

        let outcome = ActionOutcome::from(api.delete(&ManifestId::new("5")));

        assert_eq!(
            outcome,
            ActionOutcome::Errored {
                reason: "connection refused".into()
            }
        );
    }

    #[test]
    fn create_posts_form_fields_as_json() {
        let api = ManifestApi::new(FakeTransport::replying_json(
            201,
            r#"{"success": true, "romaneio": {"id": 12, "status": "P"}}"#,
        ));
        let new = NewManifest {
            pedido_compra: "000285847".into(),
            nota_fiscal: "123456".into(),
            chave_acesso: "3".repeat(44),
        };

        let outcome = ActionOutcome::from(api.create(&new));

        assert_eq!(
            outcome,
            ActionOutcome::Succeeded {
                message: Some("12".into())
            }
        );
        assert_eq!(
            api.transport().calls(),
            vec![(Method::Post, "/api/romaneios".to_string())]
        );
        let body = api.transport().bodies().remove(0).expect("body expected");
        assert_eq!(body["pedido_compra"], "000285847");
        assert_eq!(body["nota_fiscal"], "123456");
        assert_eq!(body["chave_acesso"], "3".repeat(44));
    }

    #[test]
    fn create_rejection_carries_server_error() {
        let api = ManifestApi::new(FakeTransport::replying_json(
            409,
            r#"{"success": false, "error": "Já existe um romaneio para o pedido 000285847"}"#,
        ));
        let new = NewManifest {
            pedido_compra: "000285847".into(),
            nota_fiscal: "1".into(),
            chave_acesso: "3".repeat(44),
        };

        let outcome = ActionOutcome::from(api.create(&new));

        assert_eq!(
            outcome,
            ActionOutcome::Failed {
                error: "Já existe um romaneio para o pedido 000285847".into()
            }
        );
    }

    #[test]
    fn list_returns_rows_or_rejection() {
        let fake = FakeTransport::replying_json(
            200,
            r#"{"success": true, "romaneios": [{"id": 1, "pedido_compra": "000285847", "status": "P"}]}"#,
        );
        fake.push_json(200, r#"{"success": false, "error": "sessão expirada"}"#);
        let api = ManifestApi::new(fake);

        let rows = api.list().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pedido_compra, "000285847");

        let err = api.list().unwrap_err();
        assert_eq!(err.to_string(), "sessão expirada");
    }
}
