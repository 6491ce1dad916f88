//! Navigation Component
//!
//! Header with brand, view links and theme toggle. Views are panels, not
//! URL routes: clicking a link shows the panel and reloads its collection.

use leptos::*;

use studyhub::View;

use crate::state::use_ui_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_ui_state();

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <span class="text-xl font-bold text-white">"StudyHub"</span>

                    <div class="flex items-center space-x-1">
                        {View::ALL
                            .into_iter()
                            .map(|view| view! { <NavLink view=view /> })
                            .collect_view()}

                        <button
                            type="button"
                            class="ml-4 px-3 py-2 rounded-lg text-gray-300 hover:bg-gray-700"
                            on:click=move |_| state.toggle_theme()
                        >
                            {move || if state.theme.get().is_dark() { "Light" } else { "Dark" }}
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(view: View) -> impl IntoView {
    let state = use_ui_state();

    view! {
        <button
            type="button"
            class=move || {
                let base = "px-4 py-2 rounded-lg transition-colors";
                if state.router.get().is_active(view) {
                    format!("{} bg-gray-700 text-white", base)
                } else {
                    format!("{} text-gray-300 hover:text-white hover:bg-gray-700", base)
                }
            }
            on:click=move |_| state.navigate(view)
        >
            {view.nav_label()}
        </button>
    }
}
