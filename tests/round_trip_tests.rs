use launchpath::client::session::FALLBACK_REPLY;
use launchpath::client::{ChatSession, ChatTransport, ClientError, Identity, ProxyTransport};
use launchpath::config::ProxyConfig;
use launchpath::message::Message;
use launchpath::routes::create_router;
use launchpath::state::AppState;
use mockito::{Matcher, Server};

/// Serve the proxy on an ephemeral port and return its chat URL.
async fn spawn_proxy(config: ProxyConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router().with_state(AppState::shared(config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/chat")
}

#[tokio::test]
async fn ui_and_proxy_round_trip() {
    let mut provider = Server::new_async().await;
    let upstream = provider
        .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Hi there"}]}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let url = spawn_proxy(ProxyConfig::with_provider(provider.url(), Some("k"))).await;
    let transport = ProxyTransport::new(url);
    let mut session = ChatSession::with_identity(Identity::guest());

    session.set_input("Hello");
    assert!(session.submit(&transport).await);

    assert_eq!(
        session.transcript(),
        &[Message::user("Hello"), Message::assistant("Hi there")]
    );
    upstream.assert_async().await;
}

#[tokio::test]
async fn empty_candidates_become_ui_fallback() {
    let mut provider = Server::new_async().await;
    let _upstream = provider
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let url = spawn_proxy(ProxyConfig::with_provider(provider.url(), Some("k"))).await;
    let transport = ProxyTransport::new(url);

    let err = transport.send(&[Message::user("Hello")]).await.unwrap_err();
    match err {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, FALLBACK_REPLY);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let mut session = ChatSession::with_identity(Identity::guest());
    session.set_input("Hello");
    session.submit(&transport).await;
    assert_eq!(
        session.transcript().last(),
        Some(&Message::assistant(FALLBACK_REPLY))
    );
}

#[tokio::test]
async fn unreachable_proxy_is_transport_error() {
    let transport = ProxyTransport::new("http://127.0.0.1:9/chat");
    let err = transport.send(&[Message::user("Hello")]).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
