//! Pure transcript logic: composing the optimistic echo, mapping server
//! replies into messages, and deciding whether an async result still
//! belongs to the chat on screen.

use crate::models::{Message, SendMessageReply};

/// Display name the backend uses for its own messages.
pub const BOT_SENDER: &str = "Dexa";

/// Whether there is anything to send: non-whitespace text or an attachment.
pub fn has_payload(text: &str, has_attachment: bool) -> bool {
    !text.trim().is_empty() || has_attachment
}

/// Messages are applied to the view only while the chat they were issued
/// for is still selected. A late reply for a previously selected chat is
/// discarded instead of overwriting the current transcript.
pub fn targets_active_chat(issued_for: u64, active: Option<u64>) -> bool {
    active == Some(issued_for)
}

/// Builds the optimistic echo of an outgoing message. The display text is
/// annotated with the attachment name; the raw input still goes on the wire
/// unannotated.
pub fn compose_outgoing(sender: &str, text: &str, attachment_name: Option<&str>) -> Message {
    let display = match attachment_name {
        Some(name) => format!("{text} [📎 {name}]"),
        None => text.to_string(),
    };
    Message {
        sender: sender.to_string(),
        text: display,
        mood: None,
        spotify_embed_id: None,
        file: attachment_name.map(str::to_string),
    }
}

/// Converts a send reply into the bot's transcript entry.
pub fn reply_message(reply: SendMessageReply) -> Message {
    Message {
        sender: BOT_SENDER.to_string(),
        text: reply.response,
        mood: reply.mood,
        spotify_embed_id: reply.spotify_embed_id,
        file: None,
    }
}

/// The backend has answered as both "Dexa" and "bot" across versions.
pub fn is_bot(sender: &str) -> bool {
    sender == BOT_SENDER || sender == "bot"
}

pub fn spotify_embed_url(embed_id: &str) -> String {
    format!("https://open.spotify.com/embed/track/{embed_id}?utm_source=generator&theme=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_without_attachment_is_not_sendable() {
        assert!(!has_payload("", false));
        assert!(!has_payload("   \n", false));
        assert!(has_payload("", true));
        assert!(has_payload("hello", false));
    }

    #[test]
    fn echo_annotates_attachment_name() {
        let msg = compose_outgoing("ada", "take a look", Some("notes.pdf"));
        assert_eq!(msg.text, "take a look [📎 notes.pdf]");
        assert_eq!(msg.file.as_deref(), Some("notes.pdf"));

        let plain = compose_outgoing("ada", "take a look", None);
        assert_eq!(plain.text, "take a look");
        assert_eq!(plain.file, None);
    }

    #[test]
    fn send_appends_echo_then_reply() {
        let mut transcript = Vec::new();
        transcript.push(compose_outgoing("ada", "hello", None));
        transcript.push(reply_message(SendMessageReply {
            response: "hi".into(),
            mood: Some("happy".into()),
            spotify_embed_id: None,
        }));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].sender, "ada");
        assert_eq!(transcript[0].text, "hello");
        assert_eq!(transcript[1].sender, "Dexa");
        assert_eq!(transcript[1].text, "hi");
        assert_eq!(transcript[1].mood.as_deref(), Some("happy"));
    }

    #[test]
    fn stale_load_does_not_clobber_newer_selection() {
        // Chat 1 is selected, then chat 2; chat 1's fetch resolves last.
        let active = Some(2);
        let mut messages = vec![Message {
            sender: "Dexa".into(),
            text: "chat two history".into(),
            mood: None,
            spotify_embed_id: None,
            file: None,
        }];

        for (issued_for, fetched) in [(2, "chat two history"), (1, "chat one history")] {
            if targets_active_chat(issued_for, active) {
                messages = vec![Message {
                    sender: "Dexa".into(),
                    text: fetched.into(),
                    mood: None,
                    spotify_embed_id: None,
                    file: None,
                }];
            }
        }

        assert_eq!(messages[0].text, "chat two history");
        assert!(!targets_active_chat(1, None));
    }

    #[test]
    fn bot_detection_covers_both_spellings() {
        assert!(is_bot("Dexa"));
        assert!(is_bot("bot"));
        assert!(!is_bot("ada"));
    }
}
