//! Requests to the school REST API.
//!
//! Building a request and reading its response are plain functions over
//! [`ApiRequest`] and [`ApiResponse`]; moving bytes is left to a [`Transport`]
//! supplied by the host. Credentials come from an injected
//! [`CredentialProvider`] rather than from any global storage.

pub mod resource;
pub mod select;
pub mod session;

use dotenv::dotenv;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::env;
use thiserror::Error;
use url::Url;

use crate::consts::{API_URL_ENV, DEFAULT_API_URL};
use crate::utils::validation::{FieldValue, FileHandle, FormValues};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unknown CRUD operation '{0}'")]
    UnknownOperation(char),
    #[error("Session token cannot be sent in a header")]
    InvalidToken,
    #[error("Cannot encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Cannot decode response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Errors: {0}")]
    Validation(String),
    #[error("{0}")]
    Server(String),
    #[error("Error {}: {}", .status.as_u16(), .status.canonical_reason().unwrap_or("Unknown status"))]
    Status { status: StatusCode },
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Where the API lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Reads the base URL from the environment (or a `.env` file), falling
    /// back to the local development server.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenv().ok();
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }

    /// Full URL of an endpoint such as `/cursos/12`, with its query string
    pub fn url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, endpoint))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

/// HTTP method for a CRUD letter: `C`reate, `R`ead, `U`pdate, `D`elete
pub fn crud_method(operation: char) -> Result<Method, ApiError> {
    match operation.to_ascii_uppercase() {
        'C' => Ok(Method::POST),
        'R' => Ok(Method::GET),
        'U' => Ok(Method::PUT),
        'D' => Ok(Method::DELETE),
        other => Err(ApiError::UnknownOperation(other)),
    }
}

/// Source of the bearer token attached to requests
pub trait CredentialProvider {
    fn token(&self) -> Option<String>;
}

impl CredentialProvider for Option<String> {
    fn token(&self) -> Option<String> {
        self.clone()
    }
}

/// Data sent with a request: plain fields and selected files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestPayload {
    pub fields: Map<String, Value>,
    pub files: Vec<(String, FileHandle)>,
}

impl RequestPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: FileHandle) -> Self {
        self.files.push((name.into(), file));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }
}

impl From<Map<String, Value>> for RequestPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            files: Vec::new(),
        }
    }
}

/// Submitting a validated form: text and checkboxes become fields, selected
/// files become parts of a multipart body.
impl From<&FormValues> for RequestPayload {
    fn from(values: &FormValues) -> Self {
        let mut payload = Self::new();
        for (name, value) in values {
            match value {
                FieldValue::Text(text) => {
                    payload.fields.insert(name.clone(), Value::String(text.clone()));
                }
                FieldValue::Checked(checked) => {
                    payload.fields.insert(name.clone(), Value::Bool(*checked));
                }
                FieldValue::File(Some(file)) => payload.files.push((name.clone(), file.clone())),
                FieldValue::File(None) => {
                    payload.fields.insert(name.clone(), Value::Null);
                }
            }
        }
        payload
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text(String),
    File(FileHandle),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized JSON object
    Json(String),
    /// Parts of a `multipart/form-data` body; the transport picks the boundary
    Multipart(Vec<(String, FormPart)>),
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn build<C: CredentialProvider + ?Sized>(
        config: &ApiConfig,
        endpoint: &str,
        method: Method,
        payload: &RequestPayload,
        query: &[(&str, String)],
        credentials: &C,
    ) -> Result<Self, ApiError> {
        let url = config.url(endpoint, query)?;
        let mut headers = HeaderMap::new();

        if let Some(token) = credentials.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        }

        let sends_body = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE].contains(&method);

        let body = if !sends_body {
            if !payload.is_empty() {
                debug!("Ignoring body of {} request to {}", method, url);
            }
            RequestBody::Empty
        } else if !payload.files.is_empty() {
            let mut parts: Vec<(String, FormPart)> = payload
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), FormPart::Text(part_text(value))))
                .collect();
            parts.extend(
                payload
                    .files
                    .iter()
                    .map(|(name, file)| (name.clone(), FormPart::File(file.clone()))),
            );
            RequestBody::Multipart(parts)
        } else if !payload.fields.is_empty() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            RequestBody::Json(serde_json::to_string(&payload.fields).map_err(ApiError::Encode)?)
        } else {
            RequestBody::Empty
        };

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }
}

fn part_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain".to_string()),
            body: body.to_string(),
        }
    }
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }
}

/// Decodes a response and turns error statuses into an [`ApiError`].
///
/// The body is read as JSON when the server says it is. For failures, a list
/// of field errors (`{"error": [{"msg": ...}]}`) wins over a single `error` or
/// `message`, which wins over the bare status.
pub fn interpret(response: ApiResponse) -> Result<Payload, ApiError> {
    let is_json = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("application/json"));

    let payload = if is_json {
        Payload::Json(serde_json::from_str(&response.body).map_err(ApiError::Decode)?)
    } else {
        Payload::Text(response.body)
    };

    if response.status.is_success() {
        return Ok(payload);
    }

    warn!("API answered {}", response.status);

    let Payload::Json(data) = payload else {
        return Err(ApiError::Status {
            status: response.status,
        });
    };

    if let Some(errors) = data.get("error").and_then(Value::as_array) {
        let messages: Vec<&str> = errors
            .iter()
            .filter_map(|e| e.get("msg").and_then(Value::as_str))
            .collect();
        return Err(ApiError::Validation(messages.join(", ")));
    }

    let message = ["error", "message"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_str))
        .filter(|m| !m.is_empty());

    match message {
        Some(message) => Err(ApiError::Server(message.to_string())),
        None => Err(ApiError::Status {
            status: response.status,
        }),
    }
}

/// Moves a request to the server and brings the response back
pub trait Transport {
    fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// A transport with its configuration and credentials
pub struct Client<T: Transport, C: CredentialProvider> {
    config: ApiConfig,
    transport: T,
    credentials: C,
}

impl<T: Transport, C: CredentialProvider> Client<T, C> {
    pub fn new(config: ApiConfig, transport: T, credentials: C) -> Self {
        Self {
            config,
            transport,
            credentials,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    pub fn credentials_mut(&mut self) -> &mut C {
        &mut self.credentials
    }

    pub fn request(
        &mut self,
        endpoint: &str,
        method: Method,
        payload: &RequestPayload,
        query: &[(&str, String)],
    ) -> Result<Payload, ApiError> {
        let request =
            ApiRequest::build(&self.config, endpoint, method, payload, query, &self.credentials)?;

        debug!("Sending {} {}", request.method, request.url);
        let response = self.transport.send(&request)?;
        info!("{} {} -> {}", request.method, request.url, response.status);

        interpret(response)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Answers every request with the same response and keeps what was sent
    pub(crate) struct CannedTransport {
        pub response: ApiResponse,
        pub sent: Vec<ApiRequest>,
    }

    impl CannedTransport {
        pub fn new(response: ApiResponse) -> Self {
            Self {
                response,
                sent: Vec::new(),
            }
        }
    }

    impl Transport for CannedTransport {
        fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.sent.push(request.clone());
            Ok(self.response.clone())
        }
    }

    fn config() -> ApiConfig {
        ApiConfig::new(DEFAULT_API_URL).expect("valid default URL")
    }

    #[test]
    fn test_crud_method() {
        let cases = vec![
            ('C', Method::POST),
            ('r', Method::GET),
            ('U', Method::PUT),
            ('D', Method::DELETE),
        ];
        for (operation, expected) in cases {
            assert_eq!(crud_method(operation).ok(), Some(expected), "Wrong method for {}", operation);
        }
        assert!(matches!(crud_method('X'), Err(ApiError::UnknownOperation('X'))));
    }

    #[test]
    fn test_url_with_query() {
        let url = config()
            .url("/cursos", &[("page", 0.to_string()), ("size", 10.to_string())])
            .expect("valid URL");
        assert_eq!(url.as_str(), "http://localhost:8080/api/cursos?page=0&size=10");

        let url = config().url("/cursos/7", &[]).expect("valid URL");
        assert_eq!(url.as_str(), "http://localhost:8080/api/cursos/7");
    }

    #[test]
    fn test_bearer_token_only_when_present() {
        let payload = RequestPayload::new();

        let anonymous =
            ApiRequest::build(&config(), "/roles", Method::GET, &payload, &[], &None::<String>)
                .expect("request");
        assert!(anonymous.headers.get(AUTHORIZATION).is_none());

        let token = Some("abc.def".to_string());
        let signed = ApiRequest::build(&config(), "/roles", Method::GET, &payload, &[], &token)
            .expect("request");
        assert_eq!(
            signed.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc.def")
        );
    }

    #[test]
    fn test_body_encoding() {
        let payload = RequestPayload::new().field("nombre", "Matemática").field("activo", true);

        let get = ApiRequest::build(&config(), "/cursos", Method::GET, &payload, &[], &None::<String>)
            .expect("request");
        assert_eq!(get.body, RequestBody::Empty);

        let post = ApiRequest::build(&config(), "/cursos", Method::POST, &payload, &[], &None::<String>)
            .expect("request");
        assert_eq!(post.headers.get(CONTENT_TYPE).map(|v| v.as_bytes()), Some(&b"application/json"[..]));
        let RequestBody::Json(body) = post.body else {
            panic!("POST with fields should send JSON");
        };
        let decoded: Value = serde_json::from_str(&body).expect("JSON body");
        assert_eq!(decoded, json!({ "nombre": "Matemática", "activo": true }));

        let empty = ApiRequest::build(
            &config(),
            "/cursos/1",
            Method::DELETE,
            &RequestPayload::new(),
            &[],
            &None::<String>,
        )
        .expect("request");
        assert_eq!(empty.body, RequestBody::Empty);
        assert!(empty.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_files_switch_to_multipart() {
        let payload = RequestPayload::new()
            .field("titulo", "Guía 1")
            .file("archivo", FileHandle::new("guia.pdf", 2048, "application/pdf"));

        let request =
            ApiRequest::build(&config(), "/materiales", Method::POST, &payload, &[], &None::<String>)
                .expect("request");

        assert!(request.headers.get(CONTENT_TYPE).is_none());
        let RequestBody::Multipart(parts) = request.body else {
            panic!("files should produce a multipart body");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], ("titulo".to_string(), FormPart::Text("Guía 1".to_string())));
        assert!(matches!(&parts[1].1, FormPart::File(f) if f.name == "guia.pdf"));
    }

    #[test]
    fn test_payload_from_form_values() {
        let mut values = FormValues::new();
        values.insert("nombre".to_string(), FieldValue::from("Ana"));
        values.insert("activo".to_string(), FieldValue::Checked(true));
        values.insert(
            "foto".to_string(),
            FieldValue::from(FileHandle::new("a.png", 10, "image/png")),
        );

        let payload = RequestPayload::from(&values);
        assert_eq!(payload.fields.get("nombre"), Some(&json!("Ana")));
        assert_eq!(payload.fields.get("activo"), Some(&json!(true)));
        assert_eq!(payload.files.len(), 1);
    }

    #[test]
    fn test_interpret() {
        let ok = interpret(ApiResponse::json(StatusCode::OK, &json!({ "id": 1 })));
        assert_eq!(ok.ok(), Some(Payload::Json(json!({ "id": 1 }))));

        let text = interpret(ApiResponse::text(StatusCode::OK, "pong"));
        assert_eq!(text.ok(), Some(Payload::Text("pong".to_string())));

        let validation = interpret(ApiResponse::json(
            StatusCode::BAD_REQUEST,
            &json!({ "error": [{ "msg": "nombre is required" }, { "msg": "email is invalid" }] }),
        ));
        assert_eq!(
            validation.map_err(|e| e.to_string()),
            Err("Errors: nombre is required, email is invalid".to_string())
        );

        let server = interpret(ApiResponse::json(
            StatusCode::CONFLICT,
            &json!({ "message": "Course already exists" }),
        ));
        assert!(matches!(server, Err(ApiError::Server(m)) if m == "Course already exists"));

        let bare = interpret(ApiResponse::text(StatusCode::NOT_FOUND, "<html></html>"));
        assert_eq!(bare.map_err(|e| e.to_string()), Err("Error 404: Not Found".to_string()));
    }

    #[test]
    fn test_client_request() {
        let transport = CannedTransport::new(ApiResponse::json(StatusCode::OK, &json!([])));
        let mut client = Client::new(config(), transport, Some("t0k3n".to_string()));

        let payload = client
            .request("/roles", crud_method('R').expect("read"), &RequestPayload::new(), &[])
            .expect("successful request");

        assert_eq!(payload, Payload::Json(json!([])));
        let sent = &client.transport().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url.as_str(), "http://localhost:8080/api/roles");
        assert!(sent[0].headers.contains_key(AUTHORIZATION));
    }
}
