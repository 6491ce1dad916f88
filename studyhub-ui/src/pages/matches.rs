//! Matches Page

use leptos::*;

use crate::state::use_ui_state;

#[component]
pub fn Matches() -> impl IntoView {
    let state = use_ui_state();

    view! {
        <section class="space-y-4">
            {move || state.matches.with(|panel| panel.message()).map(|message| view! {
                <p class="text-gray-400 text-sm">{message}</p>
            })}

            <div class="grid md:grid-cols-2 gap-4">
                {move || state.matches.with(|panel| panel.cards()).into_iter().map(|card| view! {
                    <div class="bg-gray-800 rounded-xl p-4">
                        <h3 class="font-semibold">{card.username}</h3>
                        <div class="flex flex-wrap gap-2 mt-2">
                            {card.subjects.into_iter().map(|subject| view! {
                                <span class="px-2 py-1 rounded-full bg-gray-700 text-xs">{subject}</span>
                            }).collect_view()}
                        </div>
                    </div>
                }).collect_view()}
            </div>
        </section>
    }
}
