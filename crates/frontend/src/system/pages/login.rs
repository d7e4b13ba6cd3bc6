use contracts::system::auth::LoginRequest;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::shared::gateway::HttpGateway;
use crate::system::auth::context::{use_auth, AuthState};
use crate::system::auth::{api, storage};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (remember, set_remember) = signal(false);
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let password_ref = NodeRef::<html::Input>::new();

    let (_, set_auth_state) = use_auth();
    let navigate = use_navigate();

    // Prefill from remembered credentials
    if let Some(creds) = storage::browser_settings().load().remembered {
        set_username.set(creds.username);
        set_password.set(creds.password);
        set_remember.set(true);
    }

    let submit = move || {
        if is_loading.get_untracked() {
            return;
        }
        let request = LoginRequest {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let remember_me = remember.get_untracked();
        set_error_message.set(None);
        if !request.is_complete() {
            set_error_message.set(Some(api::LoginError::MissingFields.to_string()));
            return;
        }

        set_is_loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let settings = storage::browser_settings();
            let result = api::login_flow(&HttpGateway, &settings, request, remember_me).await;
            set_is_loading.try_set(false);
            match result {
                Ok(()) => {
                    set_auth_state.try_set(AuthState { logged_in: true });
                    navigate("/dashboard", Default::default());
                }
                Err(e) => {
                    set_error_message.try_set(Some(e.to_string()));
                }
            }
        });
    };
    let submit = StoredValue::new_local(submit);

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1 class="login-box__title">"Forging Solutions"</h1>

                <input
                    type="text"
                    class="form__input"
                    placeholder="Όνομα Χρήστη"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            if let Some(input) = password_ref.get() {
                                let _ = input.focus();
                            }
                        }
                    }
                    disabled=move || is_loading.get()
                />

                <input
                    type="password"
                    class="form__input"
                    placeholder="Κωδικός Πρόσβασης"
                    node_ref=password_ref
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            submit.with_value(|f| f());
                        }
                    }
                    disabled=move || is_loading.get()
                />

                <label class="login-box__remember">
                    <input
                        type="checkbox"
                        prop:checked=move || remember.get()
                        on:change=move |_| set_remember.update(|v| *v = !*v)
                        disabled=move || is_loading.get()
                    />
                    <span>"Να με θυμάσαι"</span>
                </label>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <button
                    class="button button--primary"
                    on:click=move |_| submit.with_value(|f| f())
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "Σύνδεση..." } else { "Σύνδεση" }}
                </button>
            </div>
        </div>
    }
}
