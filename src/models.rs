use serde::{Deserialize, Serialize};

/// Result of the `GET /api/me` session probe.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionProbe {
    pub authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// Request body for `POST /api/login` and `POST /api/register`.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login reply. Register replies carry only a message and are
/// not deserialized into this.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub username: String,
}

/// One entry of the `GET /api/chats` list. Chat creation replies omit
/// `shared` (a chat you just created is never someone else's), so it
/// defaults to `false`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub shared: bool,
}

/// A transcript entry, either fetched from the server or synthesized
/// locally as the optimistic echo of an outgoing message.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Message {
    pub sender: String,
    pub text: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub spotify_embed_id: Option<String>,
    /// Original filename of an attachment, when one was sent with this message.
    #[serde(default)]
    pub file: Option<String>,
}

/// Reply of `GET /api/chats/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatHistory {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub share_code: Option<String>,
}

/// Request body for `POST /api/chats/{id}/message`. `file_data` is a
/// base64 data URL (`data:<mime>;base64,…`) as produced by the browser.
#[derive(Clone, Debug, Serialize)]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Reply of `POST /api/chats/{id}/message`.
#[derive(Clone, Debug, Deserialize)]
pub struct SendMessageReply {
    pub response: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub spotify_embed_id: Option<String>,
}

/// Request body for `POST /api/join`.
#[derive(Clone, Debug, Serialize)]
pub struct JoinRequest {
    pub share_code: String,
}

/// Error body the backend attaches to non-2xx replies.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_list_ignores_extra_fields() {
        let json = r#"[{"id": 3, "title": "Trip planning", "shared": true, "owner": "bea"}]"#;
        let chats: Vec<ChatSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(
            chats,
            vec![ChatSummary {
                id: 3,
                title: "Trip planning".into(),
                shared: true,
            }]
        );
    }

    #[test]
    fn created_chat_defaults_to_not_shared() {
        let json = r#"{"id": 7, "title": "New Conversation"}"#;
        let chat: ChatSummary = serde_json::from_str(json).unwrap();
        assert!(!chat.shared);
    }

    #[test]
    fn message_optional_fields_default_to_none() {
        let json = r#"{"sender": "ada", "text": "hello"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.mood, None);
        assert_eq!(msg.spotify_embed_id, None);
        assert_eq!(msg.file, None);
    }

    #[test]
    fn history_deserializes_server_shape() {
        let json = r#"{
            "title": "New Conversation",
            "share_code": "4f2c1f0e",
            "messages": [
                {"sender": "ada", "text": "play something", "mood": null,
                 "spotify_embed_id": null, "file": null},
                {"sender": "Dexa", "text": "On it", "mood": "happy",
                 "spotify_embed_id": "6rqhFgbbKwnb9MLmUQDhG6", "file": null}
            ]
        }"#;
        let history: ChatHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.share_code.as_deref(), Some("4f2c1f0e"));
        assert_eq!(history.messages.len(), 2);
        assert_eq!(history.messages[1].mood.as_deref(), Some("happy"));
    }

    #[test]
    fn send_request_skips_absent_attachment() {
        let req = SendMessageRequest {
            message: "hi".into(),
            file_data: None,
            mime_type: None,
            file_name: None,
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"hi"}"#);
    }

    #[test]
    fn session_probe_without_username() {
        let probe: SessionProbe = serde_json::from_str(r#"{"authenticated": false}"#).unwrap();
        assert!(!probe.authenticated);
        assert_eq!(probe.username, None);
    }
}
