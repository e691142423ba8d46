mod api;
mod components;
mod models;
mod state;
mod transcript;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::auth::AuthView;
use components::chat::ChatArea;
use components::sidebar::Sidebar;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    // Restore a cookie session on mount
    state.restore_session();

    let user = state.user;
    let dark_mode = state.dark_mode;

    view! {
        <div class="app-shell" class:theme-light=move || !dark_mode.get()>
            <Show
                when=move || user.get().is_some()
                fallback=|| view! { <AuthView /> }
            >
                <div class="app-container">
                    <Sidebar />
                    <ChatArea />
                </div>
            </Show>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
