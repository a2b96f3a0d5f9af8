use crate::error::{ChatError, NotificationError};
use crate::llm_client::LlmClient;
use crate::notifier::{Notifier, PushoverNotifier};
use crate::types::{Message, ModelResponse};
use serde_json::json;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Answers exactly one HTTP request with `status` and `body`; the handle yields the raw request.
    async fn serve_once(status: &'static str, body: String) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        (addr, handle)
    }

    fn llm_for(addr: SocketAddr) -> LlmClient {
        LlmClient::new(
            format!("http://{}/v1", addr),
            "sk-test".to_string(),
            "test-model".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_pushover_non_success_is_rejected() {
        let (addr, server) = serve_once("500 Internal Server Error", "oops".to_string()).await;
        let notifier = PushoverNotifier::with_endpoint(
            "u".to_string(),
            "t".to_string(),
            format!("http://{}/1/messages.json", addr),
        )
        .unwrap();

        let err = notifier.notify("hello").await.unwrap_err();
        assert!(matches!(err, NotificationError::Rejected { status: 500, ref body } if body == "oops"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_pushover_posts_form_fields() {
        let (addr, server) = serve_once("200 OK", r#"{"status":1}"#.to_string()).await;
        let notifier = PushoverNotifier::with_endpoint(
            "u".to_string(),
            "t".to_string(),
            format!("http://{}/1/messages.json", addr),
        )
        .unwrap();

        notifier.notify("hello").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /1/messages.json"));
        assert!(request.contains("user=u"));
        assert!(request.contains("token=t"));
        assert!(request.contains("message=hello"));
    }

    #[tokio::test]
    async fn test_pushover_unreachable_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier =
            PushoverNotifier::with_endpoint("u".to_string(), "t".to_string(), format!("http://{}/", addr))
                .unwrap();
        let err = notifier.notify("hello").await.unwrap_err();
        assert!(matches!(err, NotificationError::Transport(_)));
    }

    #[tokio::test]
    async fn test_llm_non_success_is_model_unavailable() {
        let (addr, server) =
            serve_once("500 Internal Server Error", r#"{"error":"overloaded"}"#.to_string()).await;
        let llm = llm_for(addr);

        let err = llm
            .chat_once(&[Message::user("hi")], &json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::ModelUnavailable(ref msg) if msg.contains("500")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_llm_success_round_trip() {
        let body = json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Hi!"},
                "finish_reason": "stop"
            }]
        })
        .to_string();
        let (addr, server) = serve_once("200 OK", body).await;
        let llm = llm_for(addr);

        let response = llm
            .chat_once(&[Message::user("hello")], &json!([]))
            .await
            .unwrap();
        assert_eq!(response, ModelResponse::FinalAnswer("Hi!".to_string()));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(request.contains(r#""model":"test-model""#));
        assert!(!request.contains(r#""tools""#));
    }

    #[tokio::test]
    async fn test_llm_unreachable_is_model_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = llm_for(addr)
            .chat_once(&[Message::user("hi")], &json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::ModelUnavailable(_)));
    }
}
