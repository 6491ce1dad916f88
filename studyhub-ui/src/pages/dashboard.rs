//! Dashboard Page
//!
//! Subjects overview.

use leptos::*;

use crate::state::use_ui_state;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_ui_state();

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Subjects"</h2>
            {move || state.subjects.with(|panel| {
                match panel.empty_message() {
                    Some(message) => view! {
                        <p class="text-gray-400 text-sm">{message}</p>
                    }.into_view(),
                    None => view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            {panel.subjects().iter().map(|subject| view! {
                                <div class="bg-gray-700 rounded-lg p-4">
                                    <span class="font-semibold">{subject.name.clone()}</span>
                                </div>
                            }).collect_view()}
                        </div>
                    }.into_view(),
                }
            })}
        </section>
    }
}
