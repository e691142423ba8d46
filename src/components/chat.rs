use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::Message;
use crate::state::AppState;
use crate::transcript;

/// Main chat area: welcome screen while nothing is selected, otherwise the
/// transcript of the active chat with the share button and input row.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let error = state.error;
    let active_chat = state.active_chat;

    view! {
        <main class="chat-area">
            {move || error.get().map(|err| view! { <div class="error-banner">{err}</div> })}

            {move || {
                if active_chat.get().is_none() {
                    view! { <WelcomeScreen /> }.into_any()
                } else {
                    view! { <ConversationView /> }.into_any()
                }
            }}
        </main>
    }
}

#[component]
fn WelcomeScreen() -> impl IntoView {
    view! {
        <div class="welcome-screen">
            <div class="welcome-icon">"🧠"</div>
            <h2>"Welcome to Dexa AI"</h2>
            <p>"Try: \"Gold price in INR\" or \"Play some music\""</p>
        </div>
    }
}

#[component]
fn ConversationView() -> impl IntoView {
    let state = expect_context::<AppState>();
    let messages = state.messages;
    let loading = state.loading;

    let on_share = {
        let state = state.clone();
        move |_| state.copy_share_code()
    };

    view! {
        <div class="share-row">
            <button class="share-btn" on:click=on_share>
                "📤 Share Chat"
            </button>
        </div>

        <div class="messages-container">
            <For
                each=move || messages.get().into_iter().enumerate()
                key=|(idx, msg)| (*idx, msg.clone())
                children=|(_, msg): (usize, Message)| view! { <MessageBubble msg=msg /> }
            />
            {move || {
                loading.get().then(|| {
                    view! {
                        <div class="message bot">
                            <div class="bubble typing">"Dexa is thinking…"</div>
                        </div>
                    }
                })
            }}
        </div>

        <ChatInput />
    }
}

/// A single transcript entry: avatar, bubble, optional mood tag, optional
/// attachment chip and Spotify embed.
#[component]
fn MessageBubble(msg: Message) -> impl IntoView {
    let bot = transcript::is_bot(&msg.sender);
    let Message {
        sender,
        text,
        mood,
        spotify_embed_id,
        file,
    } = msg;

    let initial = sender
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "U".to_string());
    let sender_label = (!bot).then(|| view! { <span class="sender-label">{sender}</span> });

    view! {
        <div class=if bot { "message bot" } else { "message user" }>
            {sender_label}
            <div class="message-row">
                {if bot {
                    view! { <div class="avatar bot-avatar">"D"</div> }.into_any()
                } else {
                    view! { <div class="avatar user-avatar">{initial}</div> }.into_any()
                }}
                <div class="bubble">
                    {text}
                    {file.map(|name| view! { <div class="attachment-chip">"📎 " {name}</div> })}
                </div>
            </div>
            {mood.map(|m| view! { <span class="mood-tag">{m}</span> })}
            {spotify_embed_id.map(|id| {
                view! {
                    <iframe
                        class="spotify-embed"
                        src=transcript::spotify_embed_url(&id)
                        width="100%"
                        height="152"
                        allow="autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture"
                        {..leptos::tachys::html::attribute::loading("lazy")}
                    ></iframe>
                }
            })}
        </div>
    }
}

/// Input row: file picker, message input and send button. Sending is also
/// triggered by Enter.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let input = state.input;
    let set_input = state.set_input;
    let selected_file = state.selected_file;
    let set_selected_file = state.set_selected_file;
    let loading = state.loading;

    let file_input: NodeRef<html::Input> = NodeRef::new();

    let send = {
        let state = state.clone();
        move || state.send_message()
    };

    let send_on_key = send.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            send_on_key();
        }
    };
    let on_send_click = move |_| send();

    let on_pick = move |_| {
        if let Some(el) = file_input.get() {
            el.click();
        }
    };

    let on_file_change = move |ev: ev::Event| {
        let file = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(gloo_file::File::from);
        set_selected_file.set(file);
    };

    view! {
        <div class="input-area">
            {move || {
                selected_file
                    .get()
                    .map(|file| view! { <div class="file-pill">"File: " {file.name()}</div> })
            }}
            <div class="input-row">
                <input
                    type="file"
                    class="hidden-file-input"
                    node_ref=file_input
                    accept="image/*,application/pdf,application/zip,.zip,.txt,.py,.js"
                    on:change=on_file_change
                />
                <button
                    class="attach-btn"
                    class:has-file=move || selected_file.get().is_some()
                    on:click=on_pick
                >
                    {move || if selected_file.get().is_some() { "📎" } else { "➕" }}
                </button>
                <input
                    class="message-input"
                    placeholder="Message Dexa..."
                    prop:value=input
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                    disabled=move || loading.get()
                />
                <button class="send-btn" on:click=on_send_click disabled=move || loading.get()>
                    "Send"
                </button>
            </div>
        </div>
    }
}
