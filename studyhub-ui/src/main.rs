//! StudyHub Web Client
//!
//! Browser front end for StudyHub built with Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! Session, routing and panel state come from the `studyhub` core crate and
//! live in signals; requests go through a `gloo-net` transport and the
//! session is persisted in `localStorage`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
