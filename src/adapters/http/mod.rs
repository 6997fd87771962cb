//! HTTP adapter: Implementation of PredictionApi over ureq.
//!
//! One blocking request per call. Callers that must not block (the TUI)
//! run these calls on the background worker.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::domain::{
    DiabetesInput, Disease, HealthStatus, HeartDiseaseInput, ParkinsonsInput, PredictionInput,
    PredictionResult,
};
use crate::ports::{ApiError, PredictionApi};

/// Error body returned by the backend on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking client for the prediction backend.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpPredictionClient {
    /// Create a client for the configured backend.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            agent: builder.build(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Predict for any typed input.
    ///
    /// # Errors
    /// See [`PredictionApi::predict`].
    pub fn predict_input<I: PredictionInput>(&self, input: &I) -> Result<PredictionResult, ApiError> {
        let payload = serde_json::to_value(input)?;
        self.predict(I::DISEASE, &payload)
    }

    /// # Errors
    /// See [`PredictionApi::predict`].
    pub fn predict_diabetes(&self, input: &DiabetesInput) -> Result<PredictionResult, ApiError> {
        self.predict_input(input)
    }

    /// # Errors
    /// See [`PredictionApi::predict`].
    pub fn predict_heart_disease(
        &self,
        input: &HeartDiseaseInput,
    ) -> Result<PredictionResult, ApiError> {
        self.predict_input(input)
    }

    /// # Errors
    /// See [`PredictionApi::predict`].
    pub fn predict_parkinsons(&self, input: &ParkinsonsInput) -> Result<PredictionResult, ApiError> {
        self.predict_input(input)
    }
}

impl PredictionApi for HttpPredictionClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn predict(
        &self,
        disease: Disease,
        payload: &serde_json::Value,
    ) -> Result<PredictionResult, ApiError> {
        let url = self.endpoint(&format!("predict/{}", disease.slug()));
        let body = payload.to_string();
        tracing::debug!(endpoint = %url, bytes = body.len(), "POST prediction request");

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&body);

        let text = read_body(&url, response)?;
        decode(&url, &text)
    }

    fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint("health");
        tracing::debug!(endpoint = %url, "GET health");

        let text = read_body(&url, self.agent.get(&url).call())?;
        decode(&url, &text)
    }
}

/// Turn a ureq outcome into a success body or a classified error.
fn read_body(
    url: &str,
    outcome: Result<ureq::Response, ureq::Error>,
) -> Result<String, ApiError> {
    match outcome {
        // Non-UTF-8 or oversized bodies are malformed; other read errors are transport.
        Ok(response) => response.into_string().map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                ApiError::MalformedResponse {
                    endpoint: url.to_string(),
                    reason: format!("unreadable response body: {e}"),
                }
            } else {
                ApiError::Transport {
                    endpoint: url.to_string(),
                    reason: format!("failed to read response body: {e}"),
                }
            }
        }),
        Err(ureq::Error::Status(status, response)) => {
            let detail = response
                .into_string()
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                .map(|b| b.error);
            Err(ApiError::Status {
                endpoint: url.to_string(),
                status,
                detail,
            })
        }
        Err(ureq::Error::Transport(transport)) => Err(ApiError::Transport {
            endpoint: url.to_string(),
            reason: transport.to_string(),
        }),
    }
}

fn decode<T: DeserializeOwned>(url: &str, text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::MalformedResponse {
        endpoint: url.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FailureKind;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// What the stub server saw.
    struct Captured {
        request_line: String,
        body: String,
    }

    /// Serve exactly one canned response on an ephemeral port.
    fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<Captured>) {
        serve_bytes(status, body.as_bytes().to_vec())
    }

    /// Like `serve_once`, for bodies that need not be text.
    fn serve_bytes(status: u16, body: Vec<u8>) -> (String, mpsc::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
        let addr = listener.local_addr().expect("Should have addr");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };

            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                let n = stream.read(&mut chunk).unwrap_or(0);
                if n == 0 {
                    return;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).unwrap_or(0);
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let request_line = head.lines().next().unwrap_or_default().to_string();
            let req_body = String::from_utf8_lossy(&buf[header_end..]).to_string();
            let _ = tx.send(Captured {
                request_line,
                body: req_body,
            });

            let response_head = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(response_head.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
        });

        (format!("http://{addr}/api"), rx)
    }

    fn client(base_url: String) -> HttpPredictionClient {
        HttpPredictionClient::new(&ApiConfig {
            base_url,
            timeout: Some(std::time::Duration::from_secs(5)),
        })
    }

    #[test]
    fn test_posts_input_to_disease_endpoint() {
        let (url, rx) = serve_once(
            200,
            r#"{"prediction":1,"confidence":0.91,"message":"High risk","riskLevel":"high"}"#,
        );
        let client = client(url);

        let input = DiabetesInput {
            pregnancies: 2.0,
            glucose: 130.0,
            blood_pressure: 80.0,
            skin_thickness: 25.0,
            insulin: 100.0,
            bmi: 28.5,
            diabetes_pedigree_function: 0.5,
            age: 45.0,
        };
        let result = client.predict_diabetes(&input).expect("Should predict");
        assert_eq!(result.prediction, 1);

        let captured = rx.recv().expect("Server should capture request");
        assert_eq!(captured.request_line, "POST /api/predict/diabetes HTTP/1.1");

        let sent: DiabetesInput = serde_json::from_str(&captured.body).expect("JSON body");
        assert_eq!(sent, input);
    }

    #[test]
    fn test_heart_and_parkinsons_routes() {
        let ok = r#"{"prediction":0,"confidence":0.7,"message":"ok","riskLevel":"low"}"#;

        let (url, rx) = serve_once(200, ok);
        client(url)
            .predict_heart_disease(&HeartDiseaseInput::sample())
            .expect("Should predict");
        assert!(rx.recv().expect("Captured").request_line.contains("/api/predict/heart "));

        let (url, rx) = serve_once(200, ok);
        client(url)
            .predict_parkinsons(&ParkinsonsInput::sample())
            .expect("Should predict");
        assert!(rx.recv().expect("Captured").request_line.contains("/api/predict/parkinsons "));
    }

    #[test]
    fn test_server_error_is_request_failed() {
        let (url, _rx) = serve_once(500, r#"{"error":"Failed to make prediction"}"#);
        let err = client(url)
            .predict_diabetes(&DiabetesInput::sample())
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::RequestFailed);
        match err {
            ApiError::Status { status, detail, .. } => {
                assert_eq!(status, 500);
                assert_eq!(detail.as_deref(), Some("Failed to make prediction"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let (url, _rx) = serve_once(200, r#"{"result":"positive"}"#);
        let err = client(url)
            .predict_parkinsons(&ParkinsonsInput::sample())
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
    }

    #[test]
    fn test_non_utf8_success_body_is_malformed() {
        let (url, _rx) = serve_bytes(200, vec![b'{', 0xff, 0xfe, b'}']);
        let err = client(url).health_check().unwrap_err();

        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn test_connection_refused_is_transport() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
            listener.local_addr().expect("Should have addr")
        };
        let err = client(format!("http://{addr}/api"))
            .health_check()
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[test]
    fn test_health_check() {
        let (url, rx) = serve_once(
            200,
            r#"{"status":"healthy","message":"Disease Prediction API is running"}"#,
        );
        let health = client(url).health_check().expect("Should be healthy");
        assert_eq!(health.status, "healthy");
        assert_eq!(
            rx.recv().expect("Captured").request_line,
            "GET /api/health HTTP/1.1"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client("http://localhost:5000/api/".to_string());
        assert_eq!(client.endpoint("health"), "http://localhost:5000/api/health");
    }
}
