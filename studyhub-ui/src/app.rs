//! App Root Component
//!
//! Provides the signal store, loads every collection once and renders the
//! active view.

use leptos::*;

use studyhub::View;

use crate::components::{AlertBanner, AuthBar, Nav};
use crate::pages::{Auth, Dashboard, Groups, Matches, Resources};
use crate::state::provide_ui_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_ui_state();

    // Apply the theme preference to the document root
    create_effect(move |_| {
        let dark = state.theme.get().is_dark();
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.class_list().toggle_with_force("dark", dark);
        }
    });

    spawn_local(state.refresh_all());

    let active = move || state.router.with(|r| r.active());

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Nav />

            <main class="flex-1 container mx-auto px-4 py-8 space-y-6">
                <AuthBar />

                <div>
                    <h1 class="text-3xl font-bold">{move || active().title()}</h1>
                    <p class="text-gray-400 mt-1">{move || active().subtitle()}</p>
                </div>

                {move || match active() {
                    View::Dashboard => view! { <Dashboard /> }.into_view(),
                    View::Groups => view! { <Groups /> }.into_view(),
                    View::Resources => view! { <Resources /> }.into_view(),
                    View::Matches => view! { <Matches /> }.into_view(),
                    View::Auth => view! { <Auth /> }.into_view(),
                }}
            </main>

            <AlertBanner />
        </div>
    }
}
