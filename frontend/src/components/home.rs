use leptos::prelude::*;
use storerate::route::{AppRoute, home_for};

use crate::auth::use_auth;
use crate::web::router::use_router;

const FEATURES: [(&str, &str, &str); 4] = [
    (
        "🏪",
        "Discover Stores",
        "Find and explore stores in your area with detailed information and ratings.",
    ),
    (
        "⭐",
        "Rate & Review",
        "Share your experience by rating stores on a scale of 1 to 5 stars.",
    ),
    (
        "📊",
        "Analytics Dashboard",
        "Store owners can track their ratings and customer feedback in real-time.",
    ),
    (
        "🔐",
        "Secure & Reliable",
        "Your data is protected with industry-standard security measures.",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let get_started = move |_| {
        let target = auth.role().map_or(AppRoute::Register, home_for);
        router.navigate(target.to_path());
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="hero py-20 bg-gradient-to-br from-primary to-secondary text-primary-content">
                <div class="hero-content text-center">
                    <div class="max-w-2xl">
                        <h1 class="text-5xl font-bold">"Store Rating System"</h1>
                        <p class="py-6 text-lg">
                            "Discover, rate, and review stores in your area. Help others make informed decisions while sharing your experiences with local businesses."
                        </p>
                        <div class="flex gap-4 justify-center">
                            <button class="btn btn-lg" on:click=get_started>
                                {move || if auth.is_authenticated() { "Go to Dashboard" } else { "Get Started" }}
                            </button>
                            <Show when=move || !auth.is_authenticated()>
                                <button
                                    class="btn btn-lg btn-outline"
                                    on:click=move |_| router.navigate(AppRoute::Login.to_path())
                                >
                                    "Sign In"
                                </button>
                            </Show>
                        </div>
                    </div>
                </div>
            </div>

            <div class="max-w-6xl mx-auto px-4 py-16">
                <h2 class="text-3xl font-bold text-center mb-10">"Why Choose Our Platform?"</h2>
                <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-4">
                    {FEATURES
                        .iter()
                        .map(|(icon, title, text)| {
                            view! {
                                <div class="card bg-base-100 shadow-md">
                                    <div class="card-body items-center text-center">
                                        <div class="text-4xl">{*icon}</div>
                                        <h3 class="card-title">{*title}</h3>
                                        <p class="text-base-content/70">{*text}</p>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <Show when=move || !auth.is_authenticated()>
                <div class="bg-base-100 py-16">
                    <div class="max-w-2xl mx-auto text-center px-4">
                        <h2 class="text-3xl font-bold">"Ready to Get Started?"</h2>
                        <p class="py-4 text-base-content/70">
                            "Join thousands of users who trust our platform for store ratings and reviews."
                        </p>
                        <div class="flex gap-4 justify-center">
                            <button
                                class="btn btn-primary"
                                on:click=move |_| router.navigate(AppRoute::Register.to_path())
                            >
                                "Create Account"
                            </button>
                            <button
                                class="btn btn-outline"
                                on:click=move |_| router.navigate(AppRoute::Login.to_path())
                            >
                                "Sign In"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
