use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::state::AppState;

/// Sidebar: chat list, "New Chat" button, join-by-code row and the user
/// footer with theme toggle and logout.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();

    let (join_code, set_join_code) = signal(String::new());

    let active_chat = state.active_chat;
    let chats = state.chats;
    let user = state.user;
    let dark_mode = state.dark_mode;

    let on_new = {
        let state = state.clone();
        move |_| state.create_chat()
    };

    let on_join = {
        let state = state.clone();
        move |_| {
            let code = join_code.get_untracked().trim().to_string();
            if code.is_empty() {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match api::join_chat(&code).await {
                    Ok(()) => {
                        let _ = window().alert_with_message("Joined chat successfully!");
                        set_join_code.set(String::new());
                        state.reload_all();
                    }
                    Err(e) => {
                        log::error!("Join failed: {e}");
                        let _ = window().alert_with_message("Invalid code");
                    }
                }
            });
        }
    };

    let on_theme = {
        let state = state.clone();
        move |_| state.toggle_theme()
    };

    let on_logout = {
        let state = state.clone();
        move |_| state.logout()
    };

    let initial = move || {
        user.get()
            .and_then(|u| u.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "U".to_string())
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h1>
                    <span class="logo-dot"></span>
                    " Dexa AI"
                </h1>
                <button class="new-chat-btn" on:click=on_new>
                    "+ New Chat"
                </button>
                <div class="join-row">
                    <input
                        placeholder="Enter share code..."
                        prop:value=join_code
                        on:input=move |ev| set_join_code.set(event_target_value(&ev))
                    />
                    <button class="join-btn" on:click=on_join>
                        "Join"
                    </button>
                </div>
            </div>

            <div class="chat-list">
                <h3>"Conversations"</h3>
                <For
                    each=move || chats.get()
                    key=|chat| chat.id
                    let:chat
                >
                    {
                        let state = state.clone();
                        let id = chat.id;
                        let label = if chat.shared {
                            format!("👥 {}", chat.title)
                        } else {
                            chat.title.clone()
                        };
                        view! {
                            <button
                                class="chat-item"
                                class:active=move || active_chat.get() == Some(id)
                                on:click=move |_| state.select_chat(id)
                            >
                                {label}
                            </button>
                        }
                    }
                </For>
            </div>

            <div class="sidebar-footer">
                <div class="user-badge">
                    <div class="avatar user-avatar">{initial}</div>
                    <span class="user-name">{move || user.get().unwrap_or_default()}</span>
                </div>
                <div class="footer-actions">
                    <button class="theme-btn" on:click=on_theme>
                        {move || if dark_mode.get() { "☀️" } else { "🌙" }}
                    </button>
                    <button class="logout-btn" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </div>
        </aside>
    }
}
