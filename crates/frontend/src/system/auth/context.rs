use leptos::prelude::*;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub logged_in: bool,
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    // Restore the login flag written by a previous session
    let restored = storage::browser_settings().load();
    let (auth_state, set_auth_state) = signal(AuthState {
        logged_in: restored.logged_in,
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Clear the stored flag and the in-memory state
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    api::logout_flow(&storage::browser_settings());
    set_auth_state.set(AuthState::default());
}
