use leptos::prelude::*;
use storerate::route::AppRoute;

use crate::web::router::use_router;

#[component]
fn ErrorPage(
    icon: &'static str,
    code: Option<&'static str>,
    title: &'static str,
    description: &'static str,
) -> impl IntoView {
    let router = use_router();
    view! {
        <div class="flex items-center justify-center min-h-[70vh] px-4">
            <div class="text-center max-w-lg">
                <div class="text-7xl mb-4">{icon}</div>
                {code.map(|c| view! { <h1 class="text-6xl font-bold text-error">{c}</h1> })}
                <h2 class="text-3xl font-bold mt-2">{title}</h2>
                <p class="py-4 text-base-content/70">{description}</p>
                <div class="flex gap-4 justify-center">
                    <button class="btn btn-outline" on:click=move |_| router.back()>
                        "Go Back"
                    </button>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| router.navigate(AppRoute::Home.to_path())
                    >
                        "Go Home"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <ErrorPage
            icon="🚫"
            code=None
            title="Access Denied"
            description="You don't have permission to access this page. Please check your account permissions or contact an administrator if you believe this is an error."
        />
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <ErrorPage
            icon="🔍"
            code=Some("404")
            title="Page Not Found"
            description="The page you're looking for doesn't exist. It might have been moved, deleted, or you entered the wrong URL."
        />
    }
}
