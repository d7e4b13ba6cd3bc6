//! Sidebar navigation between the admin sections

use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuItem {
    path: &'static str,
    label: &'static str,
    icon: &'static str,
}

const MENU: [MenuItem; 3] = [
    MenuItem {
        path: "/dashboard",
        label: "Ταμπλό",
        icon: "dashboard",
    },
    MenuItem {
        path: "/products",
        label: "Προϊόντα",
        icon: "products",
    },
    MenuItem {
        path: "/orders",
        label: "Παραγγελίες",
        icon: "orders",
    },
];

/// `/products/new` still highlights "Προϊόντα"
fn is_active(item_path: &str, current: &str) -> bool {
    current == item_path || current.starts_with(&format!("{}/", item_path))
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let (_, set_auth_state) = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let logout = {
        let navigate = navigate.clone();
        move |_| {
            do_logout(set_auth_state);
            navigate("/login", Default::default());
        }
    };

    view! {
        <div class="app-sidebar__content">
            {MENU.into_iter().map(|item| {
                let navigate = navigate.clone();
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || is_active(item.path, &location.pathname.get())
                        on:click=move |_| navigate(item.path, Default::default())
                    >
                        <div class="app-sidebar__item-content">
                            {icon(item.icon)}
                            <span>{item.label}</span>
                        </div>
                    </div>
                }
            }).collect_view()}

            <div class="app-sidebar__item app-sidebar__item--logout" on:click=logout>
                <div class="app-sidebar__item-content">
                    {icon("log-out")}
                    <span>"Αποσύνδεση"</span>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_matches_nested_paths() {
        assert!(is_active("/products", "/products"));
        assert!(is_active("/products", "/products/12/edit"));
        assert!(!is_active("/products", "/productsx"));
        assert!(!is_active("/orders", "/dashboard"));
    }
}
