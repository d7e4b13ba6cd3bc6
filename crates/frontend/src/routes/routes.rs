use crate::domain::a001_product::ui::details::{AddProductPage, EditProductPage};
use crate::domain::a001_product::ui::list::ProductListPage;
use crate::domain::a002_order::ui::list::OrdersPage;
use crate::domain::dashboard::DashboardPage;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

/// Everything except the login page sits behind the guard
#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell />
        </RequireAuth>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! { <Redirect path="/dashboard" /> }
}

#[component]
pub fn AppRoutes(children: Children) -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/login") view=LoginPage />
                <ParentRoute path=path!("") view=MainLayout>
                    <Route path=path!("") view=|| view! { <Redirect path="/dashboard" /> } />
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/products") view=ProductListPage />
                    <Route path=path!("/products/new") view=AddProductPage />
                    <Route path=path!("/products/:id/edit") view=EditProductPage />
                    <Route path=path!("/orders") view=OrdersPage />
                </ParentRoute>
            </Routes>
            {children()}
        </Router>
    }
}
