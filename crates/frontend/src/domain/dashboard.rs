use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="page page--dashboard">
            <div class="dashboard__welcome">
                <h1 class="page__title">"Καλώς ήρθες, Διαχειριστή"</h1>
                <p class="page__subtitle">"Διαχειρίσου το κατάστημα σου εύκολα και γρήγορα."</p>
            </div>

            <div class="dashboard__actions card">
                <h2>"Παρακαλώ επιλέξτε ενέργεια"</h2>
                <div class="dashboard__buttons">
                    <A href="/products/new" attr:class="button button--primary">
                        "Προσθήκη Προϊόντος"
                    </A>
                    <A href="/products" attr:class="button button--secondary">
                        "Προβολή Προϊόντων"
                    </A>
                </div>
            </div>
        </div>
    }
}
