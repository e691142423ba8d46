use gloo_file::futures::read_as_data_url;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

use crate::api;
use crate::models::{ChatSummary, Message, SendMessageRequest};
use crate::transcript;

/// A file picked in the input row, read into its wire form.
struct Attachment {
    data: String,
    mime: String,
    name: String,
}

/// Shared application state, provided via Leptos context. One container per
/// session: user, chat list, the transcript of the selected chat, input
/// buffer and theme flag all live here.
#[derive(Clone)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub user: ReadSignal<Option<String>>,
    pub chats: ReadSignal<Vec<ChatSummary>>,
    pub active_chat: ReadSignal<Option<u64>>,
    pub messages: ReadSignal<Vec<Message>>,
    pub share_code: ReadSignal<Option<String>>,
    pub input: ReadSignal<String>,
    pub selected_file: ReadSignal<Option<gloo_file::File>, LocalStorage>,
    pub loading: ReadSignal<bool>,
    pub dark_mode: ReadSignal<bool>,
    pub error: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    pub set_user: WriteSignal<Option<String>>,
    pub set_chats: WriteSignal<Vec<ChatSummary>>,
    pub set_active_chat: WriteSignal<Option<u64>>,
    pub set_messages: WriteSignal<Vec<Message>>,
    pub set_share_code: WriteSignal<Option<String>>,
    pub set_input: WriteSignal<String>,
    pub set_selected_file: WriteSignal<Option<gloo_file::File>, LocalStorage>,
    pub set_loading: WriteSignal<bool>,
    pub set_dark_mode: WriteSignal<bool>,
    pub set_error: WriteSignal<Option<String>>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (user, set_user) = signal(None::<String>);
        let (chats, set_chats) = signal(Vec::<ChatSummary>::new());
        let (active_chat, set_active_chat) = signal(None::<u64>);
        let (messages, set_messages) = signal(Vec::<Message>::new());
        let (share_code, set_share_code) = signal(None::<String>);
        let (input, set_input) = signal(String::new());
        let (selected_file, set_selected_file) = signal_local(None::<gloo_file::File>);
        let (loading, set_loading) = signal(false);
        let (dark_mode, set_dark_mode) = signal(true);
        let (error, set_error) = signal(None::<String>);

        let state = Self {
            user,
            chats,
            active_chat,
            messages,
            share_code,
            input,
            selected_file,
            loading,
            dark_mode,
            error,
            set_user,
            set_chats,
            set_active_chat,
            set_messages,
            set_share_code,
            set_input,
            set_selected_file,
            set_loading,
            set_dark_mode,
            set_error,
        };

        provide_context(state.clone());
        state
    }

    /// Probe the cookie session on startup; a valid one restores the user
    /// and loads their chats, anything else leaves the auth view showing.
    pub fn restore_session(&self) {
        let state = self.clone();
        spawn_local(async move {
            match api::fetch_session().await {
                Ok(probe) if probe.authenticated => {
                    if let Some(username) = probe.username {
                        state.complete_login(username);
                    }
                }
                Ok(_) => {}
                Err(e) => log::debug!("No restorable session: {e}"),
            }
        });
    }

    /// Entry point for the auth view once the server accepts credentials.
    pub fn complete_login(&self, username: String) {
        self.set_user.set(Some(username));
        self.fetch_chats();
    }

    /// Load the chat list from the backend.
    pub fn fetch_chats(&self) {
        let state = self.clone();
        spawn_local(async move {
            match api::fetch_chats().await {
                Ok(chats) => state.set_chats.set(chats),
                Err(e) => {
                    log::error!("Failed to fetch chats: {e}");
                    state.set_error.set(Some(e));
                }
            }
        });
    }

    /// Select a chat and load its transcript. The fetch is tagged with the
    /// chat id it was issued for; if the selection has moved on by the time
    /// it resolves, the result is discarded rather than applied to the
    /// wrong chat.
    pub fn select_chat(&self, id: u64) {
        let state = self.clone();
        self.set_active_chat.set(Some(id));
        self.set_loading.set(true);
        self.set_share_code.set(None);
        self.set_error.set(None);

        spawn_local(async move {
            let result = api::fetch_chat(id).await;
            if !transcript::targets_active_chat(id, state.active_chat.get_untracked()) {
                log::debug!("Discarding stale history for chat {id}");
                return;
            }
            match result {
                Ok(history) => {
                    state.set_messages.set(history.messages);
                    state.set_share_code.set(history.share_code);
                }
                Err(e) => {
                    log::error!("Failed to load chat {id}: {e}");
                    state.set_error.set(Some(e));
                }
            }
            state.set_loading.set(false);
        });
    }

    /// Create a fresh chat, prepend it to the list and switch to it.
    pub fn create_chat(&self) {
        let state = self.clone();
        spawn_local(async move {
            match api::create_chat().await {
                Ok(chat) => {
                    let id = chat.id;
                    state.set_chats.update(|chats| chats.insert(0, chat));
                    state.select_chat(id);
                }
                Err(e) => {
                    log::error!("Failed to create chat: {e}");
                    state.set_error.set(Some(e));
                }
            }
        });
    }

    /// Equivalent of the page reload after joining a shared chat: drop the
    /// current selection and re-derive everything from the server.
    pub fn reload_all(&self) {
        self.set_active_chat.set(None);
        self.set_messages.set(Vec::new());
        self.set_share_code.set(None);
        self.set_error.set(None);
        self.fetch_chats();
    }

    /// Send the current input (and attachment, if any) to the active chat.
    ///
    /// No-op when nothing is selected or there is nothing to send. The
    /// user's message is echoed into the transcript before the request
    /// goes out; the reply is appended under the same stale-chat guard as
    /// `select_chat`. The chat list is refreshed afterwards either way,
    /// since the server may have retitled the chat.
    pub fn send_message(&self) {
        let Some(chat_id) = self.active_chat.get_untracked() else {
            return;
        };
        let text = self.input.get_untracked();
        let file = self.selected_file.get_untracked();
        if !transcript::has_payload(&text, file.is_some()) {
            return;
        }

        let sender = self.user.get_untracked().unwrap_or_default();
        let state = self.clone();
        spawn_local(async move {
            let mut attachment = None;
            if let Some(file) = file {
                match read_as_data_url(&file).await {
                    Ok(data) => {
                        attachment = Some(Attachment {
                            data,
                            mime: file.raw_mime_type(),
                            name: file.name(),
                        });
                    }
                    // Unreadable files fall back to sending the text alone.
                    Err(e) => log::error!("Failed to read attachment: {e}"),
                }
            }

            let echo = transcript::compose_outgoing(
                &sender,
                &text,
                attachment.as_ref().map(|a| a.name.as_str()),
            );
            state.set_messages.update(|msgs| msgs.push(echo));
            state.set_input.set(String::new());
            state.set_selected_file.set(None);
            state.set_loading.set(true);
            state.set_error.set(None);

            let request = SendMessageRequest {
                message: text,
                file_data: attachment.as_ref().map(|a| a.data.clone()),
                mime_type: attachment.as_ref().map(|a| a.mime.clone()),
                file_name: attachment.map(|a| a.name),
            };

            let result = api::send_message(chat_id, &request).await;
            if transcript::targets_active_chat(chat_id, state.active_chat.get_untracked()) {
                match result {
                    Ok(reply) => {
                        state
                            .set_messages
                            .update(|msgs| msgs.push(transcript::reply_message(reply)));
                    }
                    Err(e) => {
                        log::error!("Failed to send message: {e}");
                        state.set_error.set(Some(e));
                    }
                }
                state.set_loading.set(false);
            }
            state.fetch_chats();
        });
    }

    /// Copy the active chat's share code to the clipboard and confirm with
    /// a blocking alert. No-op while no code is loaded.
    pub fn copy_share_code(&self) {
        let Some(code) = self.share_code.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let clipboard = window().navigator().clipboard();
            if JsFuture::from(clipboard.write_text(&code)).await.is_err() {
                log::error!("Failed to write share code to clipboard");
                return;
            }
            let _ = window().alert_with_message(&format!(
                "Share code copied: {code}\n\nSend it to a friend so they can join this chat."
            ));
        });
    }

    /// End the session server-side and wipe the view model.
    pub fn logout(&self) {
        let state = self.clone();
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                log::error!("Logout request failed: {e}");
            }
            state.set_user.set(None);
            state.set_chats.set(Vec::new());
            state.set_messages.set(Vec::new());
            state.set_active_chat.set(None);
            state.set_share_code.set(None);
            state.set_error.set(None);
        });
    }

    pub fn toggle_theme(&self) {
        self.set_dark_mode.update(|dark| *dark = !*dark);
    }
}
