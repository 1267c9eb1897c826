use log::{error, info};
use rouille::{Request, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    bot::dispatcher::MessageDispatcher,
    config::HttpConfig,
    http::error::ApiError,
    slack::events::{ChallengeResponse, EventEnvelope},
    spotify::auth::SpotifyAuth,
};

pub struct HttpServer {
    dispatcher: Arc<MessageDispatcher>,
    auth: Arc<SpotifyAuth>,
    pub config: HttpConfig,
}

#[derive(Serialize, Deserialize)]
struct StatusResponse {
    status: String,
}

impl StatusResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

impl HttpServer {
    pub fn new(
        dispatcher: Arc<MessageDispatcher>,
        auth: Arc<SpotifyAuth>,
        config: HttpConfig,
    ) -> Self {
        Self {
            dispatcher,
            auth,
            config,
        }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let response = rouille::router!(request,
            (POST) (/slack/events) => {
                self.handle_slack_events(request)
            },
            (GET) (/callback) => {
                self.handle_callback(request)
            },
            (GET) (/health) => {
                Response::json(&StatusResponse::new("healthy"))
            },
            _ => Response::empty_404()
        );

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn handle_slack_events(&self, request: &Request) -> Response {
        match self.slack_events(request) {
            Ok(r) => r,
            Err(e) => e.into_response(),
        }
    }

    /// Answers the URL verification handshake and hands message events to
    /// the dispatcher. Link processing happens in the background, the
    /// response goes out right away.
    fn slack_events(&self, request: &Request) -> Result<Response, ApiError> {
        let body = request
            .data()
            .ok_or_else(|| ApiError::BadRequest("missing request body".into()))?;
        let envelope: EventEnvelope = serde_json::from_reader(body)
            .map_err(|e| ApiError::BadRequest(format!("invalid event payload: {e}")))?;

        match envelope.kind.as_str() {
            "url_verification" => Ok(Response::json(&ChallengeResponse {
                challenge: envelope.challenge.unwrap_or_default(),
            })),

            "event_callback" => {
                if let Some(event) = envelope.message_event() {
                    self.dispatcher.dispatch(&event);
                }
                Ok(Response::json(&StatusResponse::new("ok")))
            }

            _ => Ok(Response::json(&StatusResponse::new("ok"))),
        }
    }

    /// OAuth redirect target: stores the token obtained for `code`.
    fn handle_callback(&self, request: &Request) -> Response {
        if let Some(reason) = request.get_param("error") {
            return ApiError::BadRequest(format!("Authentication failed: {reason}")).into_response();
        }

        let Some(code) = request.get_param("code") else {
            return ApiError::BadRequest("Authentication failed: No code received".into())
                .into_response();
        };

        match self.auth.exchange_code(&code) {
            Ok(_) => Response::text("Spotify authentication successful! You can close this window."),
            Err(e) => {
                error!("Spotify code exchange failed: {e}");
                ApiError::from(e).into_response()
            }
        }
    }
}

#[cfg(test)]
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: rouille::Response,
) -> anyhow::Result<T> {
    Ok(serde_json::from_reader(
        response.data.into_reader_and_size().0,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bot::{
            processor::tests::{Fixture, URL},
            spawn::{Spawn, Task},
        },
        spotify::auth::tests::config,
    };

    use std::{io::Read, sync::Mutex};
    use tempfile::{TempDir, tempdir};

    pub fn parse_text_response(response: rouille::Response) -> String {
        let mut buf = String::new();
        let mut reader = response.data.into_reader_and_size().0;
        reader.read_to_string(&mut buf).unwrap();
        buf
    }

    /// Collects tasks instead of running them
    #[derive(Default)]
    struct QueueSpawner {
        tasks: Mutex<Vec<Task>>,
    }

    impl Spawn for QueueSpawner {
        fn spawn(&self, task: Task) {
            self.tasks.lock().unwrap().push(task);
        }
    }

    struct TestServer {
        server: HttpServer,
        spawner: Arc<QueueSpawner>,
        fixture: Fixture,
        _dir: TempDir,
    }

    impl TestServer {
        fn queued(&self) -> usize {
            self.spawner.tasks.lock().unwrap().len()
        }

        fn run_queued(&self) {
            let tasks: Vec<Task> = self.spawner.tasks.lock().unwrap().drain(..).collect();
            for task in tasks {
                task();
            }
        }
    }

    fn create_server() -> TestServer {
        let dir = tempdir().unwrap();
        let fixture = Fixture::daft_punk();
        let spawner = Arc::new(QueueSpawner::default());
        let dispatcher = MessageDispatcher::new(
            Arc::new(fixture.processor(Some("playlist"))),
            spawner.clone(),
            None,
        );
        let auth = SpotifyAuth::new(config(&dir), ureq::Agent::new());

        TestServer {
            server: HttpServer::new(
                Arc::new(dispatcher),
                Arc::new(auth),
                HttpConfig {
                    bind_addr: "0.0.0.0".to_string(),
                    port: 3000,
                },
            ),
            spawner,
            fixture,
            _dir: dir,
        }
    }

    fn post_json(url: &str, body: &str) -> Request {
        Request::fake_http(
            "POST",
            url,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_health() -> anyhow::Result<()> {
        let test = create_server();

        let response = test
            .server
            .handle_request(&Request::fake_http("GET", "/health", vec![], vec![]));

        assert_eq!(response.status_code, 200);
        let body: StatusResponse = parse_json_response(response)?;
        assert_eq!(body.status, "healthy");

        Ok(())
    }

    #[test]
    fn test_url_verification_echoes_challenge() -> anyhow::Result<()> {
        let test = create_server();
        let request = post_json(
            "/slack/events",
            r#"{"token": "t", "challenge": "abc-123", "type": "url_verification"}"#,
        );

        let response = test.server.handle_request(&request);

        assert_eq!(response.status_code, 200);
        let body: ChallengeResponse = parse_json_response(response)?;
        assert_eq!(body.challenge, "abc-123");

        Ok(())
    }

    #[test]
    fn test_message_event_dispatches_links() -> anyhow::Result<()> {
        let test = create_server();
        let request = post_json(
            "/slack/events",
            &format!(
                r#"{{"type": "event_callback", "event": {{"type": "message", "channel": "C1", "user": "U1", "text": "<{URL}>"}}}}"#
            ),
        );

        let response = test.server.handle_request(&request);

        assert_eq!(response.status_code, 200);
        let body: StatusResponse = parse_json_response(response)?;
        assert_eq!(body.status, "ok");

        // answered before any processing happened
        assert_eq!(test.queued(), 1);
        assert!(test.fixture.sent().is_empty());

        test.run_queued();

        let sent = test.fixture.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("Daft Punk - One More Time"));

        Ok(())
    }

    #[test]
    fn test_bot_message_event_ignored() {
        let test = create_server();
        let request = post_json(
            "/slack/events",
            &format!(
                r#"{{"type": "event_callback", "event": {{"type": "message", "subtype": "bot_message", "channel": "C1", "text": "{URL}"}}}}"#
            ),
        );

        let response = test.server.handle_request(&request);

        assert_eq!(response.status_code, 200);
        assert_eq!(test.queued(), 0);
    }

    #[test]
    fn test_non_message_event_ignored() {
        let test = create_server();
        let request = post_json(
            "/slack/events",
            &format!(
                r#"{{"type": "event_callback", "event": {{"type": "app_mention", "channel": "C1", "text": "{URL}"}}}}"#
            ),
        );

        let response = test.server.handle_request(&request);

        assert_eq!(response.status_code, 200);
        assert_eq!(test.queued(), 0);
    }

    #[test]
    fn test_events_with_object_fields_acknowledged() -> anyhow::Result<()> {
        let test = create_server();
        let bodies = [
            r#"{"type": "event_callback", "event": {"type": "channel_created", "channel": {"id": "C024BE91L", "name": "fun", "created": 1360782804, "creator": "U024BE7LH"}}}"#,
            r#"{"type": "event_callback", "event": {"type": "team_join", "user": {"id": "U1", "name": "newcomer"}}}"#,
        ];

        for body in bodies {
            let response = test.server.handle_request(&post_json("/slack/events", body));

            assert_eq!(response.status_code, 200);
            let status: StatusResponse = parse_json_response(response)?;
            assert_eq!(status.status, "ok");
        }
        assert_eq!(test.queued(), 0);

        Ok(())
    }

    #[test]
    fn test_invalid_event_payload() {
        let test = create_server();

        let response = test
            .server
            .handle_request(&post_json("/slack/events", "not json"));

        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_callback_missing_code() {
        let test = create_server();

        let response = test
            .server
            .handle_request(&Request::fake_http("GET", "/callback", vec![], vec![]));

        assert_eq!(response.status_code, 400);
        assert!(parse_text_response(response).contains("No code received"));
    }

    #[test]
    fn test_callback_denied() {
        let test = create_server();

        let response = test.server.handle_request(&Request::fake_http(
            "GET",
            "/callback?error=access_denied",
            vec![],
            vec![],
        ));

        assert_eq!(response.status_code, 400);
        assert!(parse_text_response(response).contains("access_denied"));
    }

    #[test]
    fn test_unknown_route() {
        let test = create_server();

        let response = test
            .server
            .handle_request(&Request::fake_http("GET", "/tracks/1", vec![], vec![]));

        assert_eq!(response.status_code, 404);
    }
}
