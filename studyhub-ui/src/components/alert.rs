//! Alert Component
//!
//! The single alert slot: success or error, whichever was shown last.

use leptos::*;

use studyhub::AlertKind;

use crate::state::use_ui_state;

#[component]
pub fn AlertBanner() -> impl IntoView {
    let state = use_ui_state();

    view! {
        <div class="fixed bottom-6 right-4 z-50">
            {move || {
                state.alert.with(|slot| slot.current().cloned()).map(|alert| {
                    let (icon, bg_class) = match alert.kind {
                        AlertKind::Success => ("✓", "bg-green-600"),
                        AlertKind::Error => ("✕", "bg-red-600"),
                    };
                    view! {
                        <div class=format!(
                            "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg",
                            bg_class
                        )>
                            <span class="text-lg">{icon}</span>
                            <span class="text-sm font-medium">{alert.message}</span>
                        </div>
                    }
                })
            }}
        </div>
    }
}
