//! Auth Bar Component
//!
//! Status line, user pill and the auth buttons for the current session.

use leptos::*;

use studyhub::{AuthButton, View};

use crate::state::use_ui_state;

#[component]
pub fn AuthBar() -> impl IntoView {
    let state = use_ui_state();
    let auth_view = move || state.auth.with(|auth| auth.view());

    view! {
        <div class="flex items-center justify-between bg-gray-800 rounded-lg px-4 py-2 text-sm">
            <span class="text-gray-400">{move || auth_view().status_line()}</span>

            <div class="flex items-center space-x-2">
                {move || {
                    let pill = auth_view().user_pill();
                    (!pill.is_empty()).then(|| view! {
                        <span class="px-3 py-1 rounded-full bg-gray-700">{pill}</span>
                    })
                }}

                {move || {
                    auth_view()
                        .buttons()
                        .iter()
                        .map(|button| {
                            let button = *button;
                            view! {
                                <button
                                    type="button"
                                    class="px-3 py-1 rounded-lg bg-primary-600 hover:bg-primary-700"
                                    on:click=move |_| match button {
                                        AuthButton::Logout => spawn_local(state.logout()),
                                        AuthButton::Login | AuthButton::Register => state.show(View::Auth),
                                    }
                                >
                                    {button.label()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
