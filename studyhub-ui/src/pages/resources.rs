//! Resources Page
//!
//! Shared links and the share form.

use leptos::*;

use crate::pages::auth::Field;
use crate::state::use_ui_state;

#[component]
pub fn Resources() -> impl IntoView {
    let state = use_ui_state();
    let can_create = move || state.auth.with(|auth| auth.view().can_create());

    view! {
        <div class="space-y-6">
            <Show when=can_create>
                <button
                    type="button"
                    class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700"
                    on:click=move |_| state.resources.update(|p| p.open_form())
                >
                    "Share resource"
                </button>
            </Show>

            <Show when=move || state.resources.with(|p| p.is_form_open())>
                <ShareForm />
            </Show>

            <section class="space-y-4">
                {move || state.resources.with(|panel| match panel.empty_message() {
                    Some(message) => view! {
                        <p class="text-gray-400 text-sm">{message}</p>
                    }.into_view(),
                    None => panel.cards().into_iter().map(|card| view! {
                        <div class="bg-gray-800 rounded-xl p-4">
                            {match card.link {
                                Some(link) => view! {
                                    <a href=link target="_blank" class="font-semibold text-primary-400">{card.title}</a>
                                }.into_view(),
                                None => view! { <span class="font-semibold">{card.title}</span> }.into_view(),
                            }}
                            <p class="text-gray-500 text-xs mt-1">{card.meta}</p>
                        </div>
                    }).collect_view(),
                })}
            </section>
        </div>
    }
}

#[component]
fn ShareForm() -> impl IntoView {
    let state = use_ui_state();
    let resources = state.resources;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = resources.with_untracked(|p| p.form.clone());
        spawn_local(state.share_resource(form));
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4">
            <Field label="Title" kind="text"
                value=Signal::derive(move || resources.with(|p| p.form.title.clone()))
                on_input=move |v| resources.update(|p| p.form.title = v) />
            <Field label="Link" kind="url"
                value=Signal::derive(move || resources.with(|p| p.form.link.clone()))
                on_input=move |v| resources.update(|p| p.form.link = v) />

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Group"</label>
                <select
                    on:change=move |ev| {
                        let group = event_target_value(&ev).parse().ok();
                        resources.update(|p| p.form.group = group);
                    }
                    prop:value=move || resources.with(|p| {
                        p.form.group.map(|id| id.to_string()).unwrap_or_default()
                    })
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    {move || resources.with(|p| {
                        p.group_options().iter().map(|option| view! {
                            <option value=option.id.to_string()>{option.name.clone()}</option>
                        }).collect_view()
                    })}
                </select>
            </div>

            <div class="flex space-x-2">
                <button type="submit" class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700">
                    "Share"
                </button>
                <button
                    type="button"
                    class="px-4 py-2 rounded-lg bg-gray-700 hover:bg-gray-600"
                    on:click=move |_| resources.update(|p| p.close_form())
                >
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
