use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::Credentials;
use crate::state::AppState;

/// Login/register screen, shown while no session exists. Register success
/// flips back to login mode with a confirmation; login success hands the
/// username to the session state.
#[component]
pub fn AuthView() -> impl IntoView {
    let state = expect_context::<AppState>();

    let (is_register, set_is_register) = signal(false);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    // One notice line for both server errors and the post-register hint.
    let (notice, set_notice) = signal(None::<String>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let creds = Credentials {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if creds.username.is_empty() || creds.password.is_empty() {
            set_notice.set(Some("Username and password are required".to_string()));
            return;
        }
        set_notice.set(None);

        let state = state.clone();
        let register = is_register.get_untracked();
        spawn_local(async move {
            if register {
                match api::register(&creds).await {
                    Ok(()) => {
                        set_is_register.set(false);
                        set_notice.set(Some("Account created! You can now login.".to_string()));
                    }
                    Err(e) => {
                        log::error!("Registration failed: {e}");
                        set_notice.set(Some(e));
                    }
                }
            } else {
                match api::login(&creds).await {
                    Ok(resp) => state.complete_login(resp.username),
                    Err(e) => {
                        log::error!("Login failed: {e}");
                        set_notice.set(Some(e));
                    }
                }
            }
        });
    };

    let on_switch_mode = move |_| {
        set_is_register.update(|r| *r = !*r);
        set_notice.set(None);
    };

    view! {
        <div class="auth-screen">
            <div class="auth-card">
                <h2>
                    {move || if is_register.get() { "Join Dexa" } else { "Welcome Back" }}
                </h2>
                <p class="auth-subtitle">
                    {move || {
                        if is_register.get() {
                            "Create your AI workspace"
                        } else {
                            "Sign in to continue"
                        }
                    }}
                </p>

                {move || notice.get().map(|text| view! { <div class="auth-notice">{text}</div> })}

                <form on:submit=on_submit>
                    <label>"Username"</label>
                    <input
                        type="text"
                        placeholder="Enter username"
                        prop:value=username
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <label>"Password"</label>
                    <input
                        type="password"
                        placeholder="••••••••"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="auth-submit">
                        {move || if is_register.get() { "Create Account" } else { "Enter Dexa" }}
                    </button>
                </form>

                <p class="auth-switch">
                    {move || {
                        if is_register.get() {
                            "Already have an account?"
                        } else {
                            "New to Dexa?"
                        }
                    }}
                    <button class="auth-switch-btn" on:click=on_switch_mode>
                        {move || if is_register.get() { "Login" } else { "Register" }}
                    </button>
                </p>
            </div>
        </div>
    }
}
