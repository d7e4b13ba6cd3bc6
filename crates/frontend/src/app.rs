use crate::layout::global_context::AppGlobalContext;
use crate::layout::{ModalHost, ModalService};
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    // One outcome modal shared by every page
    provide_context(ModalService::new());

    view! {
        <AuthProvider>
            <AppRoutes>
                <ModalHost />
            </AppRoutes>
        </AuthProvider>
    }
}
