pub mod global_context;
pub mod left;
pub mod modal_service;
pub mod top_header;

pub use modal_service::{use_modal, ModalHost, ModalMessage, ModalService};

use leptos::prelude::*;
use leptos_router::components::Outlet;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |          Content             |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <left::Left>
                    <left::Sidebar />
                </left::Left>
                <main class="app-main">
                    <Outlet />
                </main>
            </div>
        </div>
    }
}
