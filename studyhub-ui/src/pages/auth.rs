//! Auth Page
//!
//! Login and registration forms.

use leptos::*;

use studyhub::{LoginForm, RegisterForm};

use crate::state::use_ui_state;

#[component]
pub fn Auth() -> impl IntoView {
    view! {
        <div class="grid md:grid-cols-2 gap-8">
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Login"</h2>
                <Login />
            </section>
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Register"</h2>
                <Register />
            </section>
        </div>
    }
}

#[component]
fn Login() -> impl IntoView {
    let state = use_ui_state();
    let form = create_rw_signal(LoginForm::default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(state.login(form.get_untracked()));
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <Field label="Username" kind="text"
                value=Signal::derive(move || form.with(|f| f.username.clone()))
                on_input=move |v| form.update(|f| f.username = v) />
            <Field label="Password" kind="password"
                value=Signal::derive(move || form.with(|f| f.password.clone()))
                on_input=move |v| form.update(|f| f.password = v) />
            <button type="submit" class="w-full bg-primary-600 hover:bg-primary-700 rounded-lg py-3 font-semibold">
                "Login"
            </button>
        </form>
    }
}

#[component]
fn Register() -> impl IntoView {
    let state = use_ui_state();
    let form = create_rw_signal(RegisterForm::default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(state.register(form.get_untracked()));
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <Field label="Username" kind="text"
                value=Signal::derive(move || form.with(|f| f.username.clone()))
                on_input=move |v| form.update(|f| f.username = v) />
            <Field label="Email" kind="email"
                value=Signal::derive(move || form.with(|f| f.email.clone()))
                on_input=move |v| form.update(|f| f.email = v) />
            <Field label="Password" kind="password"
                value=Signal::derive(move || form.with(|f| f.password.clone()))
                on_input=move |v| form.update(|f| f.password = v) />
            <Field label="Confirm password" kind="password"
                value=Signal::derive(move || form.with(|f| f.password2.clone()))
                on_input=move |v| form.update(|f| f.password2 = v) />
            <button type="submit" class="w-full bg-primary-600 hover:bg-primary-700 rounded-lg py-3 font-semibold">
                "Register"
            </button>
        </form>
    }
}

/// Labelled text input bound to a form field
#[component]
pub fn Field(
    label: &'static str,
    kind: &'static str,
    value: Signal<String>,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}
