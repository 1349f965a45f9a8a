//! Small building blocks shared by the pages.

use leptos::prelude::*;
use storerate::scope::RequestScope;

/// A [`RequestScope`] closed when the calling component unmounts.
pub fn use_request_scope() -> RequestScope {
    let scope = RequestScope::new();
    let closer = scope.clone();
    on_cleanup(move || closer.close());
    scope
}

#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center gap-3 py-16">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            {label.map(|l| view! { <p class="text-base-content/60">{l}</p> })}
        </div>
    }
}

/// Page-level error banner; renders nothing while `message` is `None`.
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView {
    let title = title.unwrap_or_else(|| "Error:".to_string());
    move || {
        message.get().map(|msg| {
            let title = title.clone();
            view! {
                <div role="alert" class="alert alert-error text-sm">
                    <span><strong>{title}</strong> " " {msg}</span>
                </div>
            }
        })
    }
}

#[component]
pub fn SuccessBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|msg| {
            view! {
                <div role="status" class="alert alert-success text-sm">
                    <span>{msg}</span>
                </div>
            }
        })
    }
}

/// Inline message under a form input.
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<&'static str>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|msg| view! { <span class="label-text-alt text-error">{msg}</span> })
    }
}

#[component]
pub fn EmptyState(
    icon: &'static str,
    #[prop(into)] title: String,
    #[prop(into)] detail: String,
) -> impl IntoView {
    view! {
        <div class="text-center py-12">
            <div class="text-5xl mb-4">{icon}</div>
            <h3 class="text-lg font-semibold text-base-content/70">{title}</h3>
            <p class="text-base-content/50">{detail}</p>
        </div>
    }
}

/// Labelled input bound to `value`, with its validation message below.
#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] autocomplete: &'static str,
    #[prop(optional)] help: Option<&'static str>,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let class = move || {
        let base = if multiline { "textarea textarea-bordered w-full" } else { "input input-bordered w-full" };
        if error.get().is_some() {
            format!("{base} {}", if multiline { "textarea-error" } else { "input-error" })
        } else {
            base.to_string()
        }
    };

    let control = if multiline {
        view! {
            <textarea
                id=id
                rows="3"
                placeholder=placeholder
                class=class
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                id=id
                type=kind
                placeholder=placeholder
                autocomplete=autocomplete
                class=class
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <div class="form-control w-full">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            {control}
            <div class="label flex-col items-start gap-1">
                <FieldError message=error />
                {help.map(|h| view! { <span class="label-text-alt text-base-content/60">{h}</span> })}
            </div>
        </div>
    }
}
