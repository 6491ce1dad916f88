//! Groups Page
//!
//! Group list, detail pane, membership actions and the create form.

use leptos::*;

use studyhub::panels::groups::{DETAIL_PLACEHOLDER, NO_MEMBERS, NO_RESOURCES, NO_SUBJECTS};
use studyhub::panels::{GroupCard, GroupDetail};
use studyhub::Membership;

use crate::pages::auth::Field;
use crate::state::use_ui_state;

#[component]
pub fn Groups() -> impl IntoView {
    let state = use_ui_state();
    let can_create = move || state.auth.with(|auth| auth.view().can_create());

    view! {
        <div class="space-y-6">
            <Show when=can_create>
                <button
                    type="button"
                    class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700"
                    on:click=move |_| state.groups.update(|p| p.open_form())
                >
                    "Create group"
                </button>
            </Show>

            <Show when=move || state.groups.with(|p| p.is_form_open())>
                <CreateGroupForm />
            </Show>

            <div class="grid md:grid-cols-2 gap-8">
                <section class="space-y-4">
                    {move || {
                        let signed_in = can_create();
                        state.groups.with(|panel| match panel.empty_message() {
                            Some(message) => view! {
                                <p class="text-gray-400 text-sm">{message}</p>
                            }.into_view(),
                            None => panel
                                .cards(signed_in)
                                .into_iter()
                                .map(|card| view! { <GroupCardView card=card /> })
                                .collect_view(),
                        })
                    }}
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    {move || {
                        let signed_in = can_create();
                        match state.groups.with(|panel| panel.detail(signed_in)) {
                            Some(detail) => view! { <GroupDetailView detail=detail /> }.into_view(),
                            None => view! {
                                <p class="text-gray-400 text-sm">{DETAIL_PLACEHOLDER}</p>
                            }.into_view(),
                        }
                    }}
                </section>
            </div>
        </div>
    }
}

#[component]
fn GroupCardView(card: GroupCard) -> impl IntoView {
    let state = use_ui_state();
    let id = card.id;

    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <h3 class="font-semibold">{card.name}</h3>
            <p class="text-gray-400 text-sm">{card.description}</p>
            <p class="text-gray-500 text-xs mt-1">"Owner: " {card.owner}</p>
            <div class="flex space-x-2 mt-3">
                <button
                    type="button"
                    class="px-3 py-1 rounded-lg bg-gray-700 hover:bg-gray-600"
                    on:click=move |_| spawn_local(state.load_group_detail(id))
                >
                    "View"
                </button>
                {card.can_join.then(|| view! {
                    <MembershipButton id=id membership=Membership::Join />
                })}
            </div>
        </div>
    }
}

#[component]
fn GroupDetailView(detail: GroupDetail) -> impl IntoView {
    let id = detail.id;
    let list_or = |items: Vec<String>, empty: &'static str| {
        if items.is_empty() {
            empty.to_string()
        } else {
            items.join(", ")
        }
    };

    view! {
        <div class="space-y-3">
            <h2 class="text-xl font-semibold">{detail.name}</h2>
            <p class="text-gray-400">{detail.description}</p>
            <p class="text-sm">"Subjects: " {list_or(detail.subjects, NO_SUBJECTS)}</p>
            <p class="text-sm">"Members: " {list_or(detail.members, NO_MEMBERS)}</p>

            <div class="text-sm">
                "Resources: "
                {if detail.resources.is_empty() {
                    NO_RESOURCES.into_view()
                } else {
                    view! {
                        <ul class="list-disc ml-6">
                            {detail.resources.into_iter().map(|line| view! {
                                <li>
                                    {match line.link {
                                        Some(link) => view! {
                                            <a href=link target="_blank" class="text-primary-400">{line.title}</a>
                                        }.into_view(),
                                        None => line.title.into_view(),
                                    }}
                                    " (by " {line.uploader} ")"
                                </li>
                            }).collect_view()}
                        </ul>
                    }.into_view()
                }}
            </div>

            {detail.can_manage.then(|| view! {
                <div class="flex space-x-2">
                    <MembershipButton id=id membership=Membership::Join />
                    <MembershipButton id=id membership=Membership::Leave />
                </div>
            })}
        </div>
    }
}

#[component]
fn MembershipButton(id: u64, membership: Membership) -> impl IntoView {
    let state = use_ui_state();

    view! {
        <button
            type="button"
            class="px-3 py-1 rounded-lg bg-primary-600 hover:bg-primary-700"
            on:click=move |_| spawn_local(state.change_membership(id, membership))
        >
            {membership.label()}
        </button>
    }
}

#[component]
fn CreateGroupForm() -> impl IntoView {
    let state = use_ui_state();
    let groups = state.groups;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = groups.with_untracked(|p| p.form.clone());
        spawn_local(state.create_group(form));
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4">
            <Field label="Name" kind="text"
                value=Signal::derive(move || groups.with(|p| p.form.name.clone()))
                on_input=move |v| groups.update(|p| p.form.name = v) />
            <Field label="Description" kind="text"
                value=Signal::derive(move || groups.with(|p| p.form.description.clone()))
                on_input=move |v| groups.update(|p| p.form.description = v) />
            <div class="flex space-x-2">
                <button type="submit" class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700">
                    "Create"
                </button>
                <button
                    type="button"
                    class="px-4 py-2 rounded-lg bg-gray-700 hover:bg-gray-600"
                    on:click=move |_| groups.update(|p| p.close_form())
                >
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
