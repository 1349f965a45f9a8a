use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::format::{RatingTier, average_or, tier_label};
use storerate_shared::date::long_date;
use storerate_shared::{OwnerStore, Rating, initial_of};

use crate::auth::use_auth;
use crate::components::common::{EmptyState, ErrorBanner, Spinner, use_request_scope};

const TIPS: [(&str, &str, &str); 3] = [
    (
        "🎯",
        "Provide Excellent Service",
        "Focus on customer satisfaction and quality service delivery",
    ),
    (
        "🤝",
        "Engage with Customers",
        "Build relationships and respond to customer feedback promptly",
    ),
    (
        "📈",
        "Continuous Improvement",
        "Learn from reviews and constantly improve your services",
    ),
];

fn tier_class(average: Option<f64>) -> &'static str {
    average
        .filter(|a| *a > 0.0)
        .map_or("text-base-content/50", |a| RatingTier::of(a).css_class())
}

fn review_count(count: u64) -> String {
    if count == 1 {
        "Based on 1 customer review".to_string()
    } else {
        format!("Based on {} customer reviews", count)
    }
}

#[component]
fn ReviewCard(rating: Rating) -> impl IntoView {
    let name = rating.user_name.clone().unwrap_or_else(|| "Anonymous".to_string());
    let score = rating.value.get();
    let accent = RatingTier::of(f64::from(score)).css_class();
    view! {
        <div class="card bg-base-200">
            <div class="card-body p-4">
                <div class="flex items-center justify-between">
                    <div class="flex items-center gap-2">
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content w-8 rounded-full text-sm">
                                <span>{initial_of(&name)}</span>
                            </div>
                        </div>
                        <strong>{name.clone()}</strong>
                    </div>
                    <span class=format!("badge badge-ghost font-semibold {accent}")>{score} " ⭐"</span>
                </div>
                <p class="text-xs text-base-content/50">
                    {rating.created_at.as_ref().map(long_date).unwrap_or_default()}
                </p>
            </div>
        </div>
    }
}

#[component]
fn OwnerStoreView(owned: OwnerStore) -> impl IntoView {
    let OwnerStore { store, ratings } = owned;
    let average = store.average_rating;
    let accent = tier_class(average);
    let has_average = average.is_some_and(|a| a > 0.0);

    let reviews = if ratings.is_empty() {
        view! {
            <EmptyState
                icon="💬"
                title="No Reviews Yet"
                detail="Your store hasn't received any customer ratings yet. Encourage customers to leave reviews!"
            />
        }
        .into_any()
    } else {
        view! {
            <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
                {ratings
                    .into_iter()
                    .map(|rating| view! { <ReviewCard rating=rating /> })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="grid gap-6 lg:grid-cols-2">
            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <h3 class="card-title">"📊 Store Overview"</h3>
                    <div class="text-center my-4">
                        <div class="text-5xl">"🏪"</div>
                        <h2 class="text-2xl font-bold mt-2">{store.name.clone()}</h2>
                        <p class="text-base-content/70">"Your Store"</p>
                    </div>
                    <div class="grid gap-4 md:grid-cols-2">
                        <div class="p-4 rounded-box bg-base-200">
                            <h5 class="font-semibold mb-1">"📍 Location"</h5>
                            <p class="text-base-content/70">{store.address.clone()}</p>
                        </div>
                        <div class="p-4 rounded-box bg-base-200">
                            <h5 class="font-semibold mb-1">"📧 Contact"</h5>
                            <p class="text-base-content/70 break-all">{store.email.clone()}</p>
                        </div>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-md">
                <div class="card-body items-center text-center">
                    <h3 class="card-title self-start">"⭐ Rating Analytics"</h3>
                    <div class=format!("text-6xl font-bold my-4 {accent}")>
                        {average_or(average, "N/A")}
                    </div>
                    <div class=format!("badge badge-lg badge-outline font-semibold {accent}")>
                        {if has_average { tier_label(average) } else { "No Ratings" }}
                    </div>
                    <p class="text-base-content/70 mt-2">{review_count(store.total_ratings)}</p>
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <h3 class="card-title">"💬 Customer Reviews"</h3>
                {reviews}
            </div>
        </div>

        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <h3 class="card-title">"💡 Tips to Improve Your Rating"</h3>
                <div class="grid gap-4 md:grid-cols-3">
                    {TIPS
                        .iter()
                        .map(|(icon, title, text)| {
                            view! {
                                <div class="text-center p-4">
                                    <div class="text-3xl mb-2">{*icon}</div>
                                    <h5 class="font-semibold">{*title}</h5>
                                    <p class="text-sm text-base-content/70">{*text}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn StoreOwnerDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_request_scope();
    let (owned, set_owned) = signal(Option::<OwnerStore>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let ticket = scope.begin();
    spawn_local(async move {
        let result = auth.api().my_store().await;
        ticket.apply(|| {
            match result {
                Ok(found) => set_owned.set(found),
                Err(e) => {
                    tracing::warn!(error = %e, "owner store fetch failed");
                    set_error_msg.set(Some("Failed to fetch store data".into()));
                }
            }
            set_loading.set(false);
        });
    });

    let body = move || {
        if loading.get() {
            return view! { <Spinner /> }.into_any();
        }
        if error_msg.with(Option::is_some) {
            return view! { <ErrorBanner message=error_msg /> }.into_any();
        }
        match owned.get() {
            Some(found) => view! { <OwnerStoreView owned=found /> }.into_any(),
            None => view! {
                <EmptyState
                    icon="🏪"
                    title="No Store Found"
                    detail="No store is associated with your account."
                />
            }
            .into_any(),
        }
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8 space-y-8">
            <div class="text-center">
                <h1 class="text-3xl font-bold">"🏪 Store Dashboard"</h1>
                <p class="text-base-content/70">"Manage your store and view customer feedback"</p>
            </div>
            {body}
        </div>
    }
}
