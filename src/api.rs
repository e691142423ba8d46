use gloo_net::http::{Request, Response};
use web_sys::RequestCredentials;

use crate::models::{
    ApiError, ChatHistory, ChatSummary, Credentials, JoinRequest, LoginResponse,
    SendMessageReply, SendMessageRequest, SessionProbe,
};

/// Base URL of the backend API server. The session rides on cookies, so
/// every request is sent with credentials included.
const API_BASE: &str = "http://localhost:5000";

/// Turns a non-2xx response into an error message, preferring the JSON
/// `{"error": …}` body the backend attaches when it has one.
async fn server_error(resp: Response) -> String {
    match resp.json::<ApiError>().await {
        Ok(body) => body.error,
        Err(_) => format!("Server error: {}", resp.status()),
    }
}

/// Probes the cookie session. `Err` covers both "not logged in" and
/// connectivity failures; callers treat them alike.
pub async fn fetch_session() -> Result<SessionProbe, String> {
    let resp = Request::get(&format!("{API_BASE}/api/me"))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<SessionProbe>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

pub async fn login(creds: &Credentials) -> Result<LoginResponse, String> {
    let resp = Request::post(&format!("{API_BASE}/api/login"))
        .credentials(RequestCredentials::Include)
        .json(creds)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(server_error(resp).await);
    }

    resp.json::<LoginResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

pub async fn register(creds: &Credentials) -> Result<(), String> {
    let resp = Request::post(&format!("{API_BASE}/api/register"))
        .credentials(RequestCredentials::Include)
        .json(creds)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(server_error(resp).await);
    }
    Ok(())
}

pub async fn logout() -> Result<(), String> {
    Request::post(&format!("{API_BASE}/api/logout"))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;
    Ok(())
}

/// Fetches the chat list for the signed-in user. Ordering is the server's.
pub async fn fetch_chats() -> Result<Vec<ChatSummary>, String> {
    let resp = Request::get(&format!("{API_BASE}/api/chats"))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<Vec<ChatSummary>>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

pub async fn create_chat() -> Result<ChatSummary, String> {
    let resp = Request::post(&format!("{API_BASE}/api/chats"))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<ChatSummary>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetches the full transcript and share code of one chat.
pub async fn fetch_chat(chat_id: u64) -> Result<ChatHistory, String> {
    let resp = Request::get(&format!("{API_BASE}/api/chats/{chat_id}"))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<ChatHistory>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

pub async fn send_message(
    chat_id: u64,
    req: &SendMessageRequest,
) -> Result<SendMessageReply, String> {
    let resp = Request::post(&format!("{API_BASE}/api/chats/{chat_id}/message"))
        .credentials(RequestCredentials::Include)
        .json(req)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(server_error(resp).await);
    }

    resp.json::<SendMessageReply>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

pub async fn join_chat(share_code: &str) -> Result<(), String> {
    let body = JoinRequest {
        share_code: share_code.to_string(),
    };

    let resp = Request::post(&format!("{API_BASE}/api/join"))
        .credentials(RequestCredentials::Include)
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(server_error(resp).await);
    }
    Ok(())
}
