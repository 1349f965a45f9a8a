use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::format::average_or;
use storerate::logic::{ActionError, RatingAction, StoreLogic};
use storerate_shared::{RatingValue, SortOrder, Store, StoreFilters, StoreSortField};

use crate::auth::use_auth;
use crate::components::common::{EmptyState, ErrorBanner, Spinner, use_request_scope};
use crate::web::dialog;

/// Star widget: hovering previews a score, clicking saves it.
#[component]
fn StarRating(
    average: Option<f64>,
    current: Option<RatingValue>,
    on_rate: Callback<RatingValue>,
) -> impl IntoView {
    let (hovered, set_hovered) = signal(Option::<u8>::None);
    let shown = move || hovered.get().or(current.map(|r| r.get())).unwrap_or(0);

    let stars = RatingValue::all()
        .map(|value| {
            let n = value.get();
            let class = move || {
                let mut class = String::from("text-xl cursor-pointer transition-transform");
                if n > shown() {
                    class.push_str(" grayscale opacity-40");
                }
                if hovered.get() == Some(n) {
                    class.push_str(" scale-110");
                }
                class
            };
            view! {
                <span
                    class=class
                    role="button"
                    aria-label=format!("Rate {n}")
                    on:mouseenter=move |_| set_hovered.set(Some(n))
                    on:mouseleave=move |_| set_hovered.set(None)
                    on:click=move |_| on_rate.run(value)
                >
                    "⭐"
                </span>
            }
        })
        .collect_view();

    view! {
        <div class="mt-4 space-y-2">
            <div class="text-sm text-base-content/70">
                <strong>"Average Rating: "</strong>
                {average_or(average, "No ratings")}
                " ⭐"
            </div>
            <div class="flex items-center gap-2">
                <span class="text-sm font-semibold">"Your rating: "</span>
                <div class="flex gap-0.5">{stars}</div>
                {current.map(|r| view! {
                    <span class="text-xs text-base-content/50">"(Current: " {r.get()} ")"</span>
                })}
            </div>
        </div>
    }
}

#[component]
fn StoreCard(store: Store, on_rate: Callback<(Store, RatingValue)>) -> impl IntoView {
    let average = store.average_rating;
    let current = store.user_rating;
    let name = store.name.clone();
    let address = store.address.clone();
    let email = store.email.clone();
    let rate = Callback::new(move |value| on_rate.run((store.clone(), value)));

    view! {
        <div class="card bg-base-100 shadow-md h-full">
            <div class="card-body">
                <h3 class="card-title">{name}</h3>
                <div>
                    <p class="font-semibold">"📍 Address:"</p>
                    <p class="text-base-content/70 ml-4">{address}</p>
                </div>
                <div>
                    <p class="font-semibold">"📧 Contact:"</p>
                    <p class="text-base-content/70 ml-4">{email}</p>
                </div>
                <StarRating average=average current=current on_rate=rate />
            </div>
        </div>
    }
}

#[component]
pub fn StoresPage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_request_scope();

    let filters = RwSignal::new(StoreFilters::default());
    let (stores, set_stores) = signal(Vec::<Store>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // Re-fetch whenever a filter changes; only the newest answer lands.
    Effect::new({
        let scope = scope.clone();
        move |_| {
            let current = filters.get();
            set_loading.set(true);
            let ticket = scope.begin();
            spawn_local(async move {
                let api = auth.api();
                let result = StoreLogic::new(&api).list(&current).await;
                ticket.apply(|| {
                    match result {
                        Ok(list) => {
                            set_stores.set(list);
                            set_error_msg.set(None);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "store directory fetch failed");
                            set_error_msg.set(Some("Failed to fetch stores".into()));
                        }
                    }
                    set_loading.set(false);
                });
            });
        }
    });

    let on_rate = Callback::new(move |(store, value): (Store, RatingValue)| {
        let current = filters.get_untracked();
        let ticket = scope.begin();
        spawn_local(async move {
            let api = auth.api();
            let action = RatingAction::for_store(&store);
            let result = StoreLogic::new(&api).rate(&store, value, &current).await;
            match result {
                Ok(list) => {
                    ticket.apply(|| {
                        set_stores.set(list);
                        set_loading.set(false);
                    });
                }
                Err(ActionError::Action(e)) => {
                    dialog::alert(&format!("{}: {}", action.failure_prefix(), e));
                }
                Err(ActionError::Reload(e)) => {
                    tracing::warn!(error = %e, "store directory reload failed");
                    ticket.apply(|| {
                        set_error_msg.set(Some("Failed to fetch stores".into()));
                        set_loading.set(false);
                    });
                }
            }
        });
    });

    let grid = move || {
        if loading.get() {
            return view! { <Spinner /> }.into_any();
        }
        let list = stores.get();
        if list.is_empty() {
            return view! {
                <EmptyState
                    icon="🔍"
                    title="No stores found"
                    detail="Try adjusting your search criteria to find stores."
                />
            }
            .into_any();
        }
        view! {
            <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                {list
                    .into_iter()
                    .map(|store| view! { <StoreCard store=store on_rate=on_rate /> })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8 space-y-8">
            <div class="text-center">
                <h1 class="text-3xl font-bold">"🏪 Store Directory"</h1>
                <p class="text-base-content/70">"Discover and rate stores in your area"</p>
            </div>

            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <h3 class="card-title">"🔍 Search & Filter"</h3>
                    <div class="grid gap-4 md:grid-cols-4">
                        <label class="form-control">
                            <span class="label-text">"Store Name"</span>
                            <input
                                type="text"
                                class="input input-bordered"
                                placeholder="Search by store name..."
                                prop:value=move || filters.with(|f| f.name.clone())
                                on:input=move |ev| filters.update(|f| f.name = event_target_value(&ev))
                            />
                        </label>
                        <label class="form-control">
                            <span class="label-text">"Address"</span>
                            <input
                                type="text"
                                class="input input-bordered"
                                placeholder="Search by address..."
                                prop:value=move || filters.with(|f| f.address.clone())
                                on:input=move |ev| filters.update(|f| f.address = event_target_value(&ev))
                            />
                        </label>
                        <label class="form-control">
                            <span class="label-text">"Sort By"</span>
                            <select
                                class="select select-bordered"
                                prop:value=move || filters.with(|f| f.sort_by.as_str())
                                on:change=move |ev| {
                                    if let Some(field) = StoreSortField::parse(&event_target_value(&ev)) {
                                        filters.update(|f| f.sort_by = field);
                                    }
                                }
                            >
                                {StoreSortField::ALL
                                    .into_iter()
                                    .map(|field| view! { <option value=field.as_str()>{field.label()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="form-control">
                            <span class="label-text">"Order"</span>
                            <select
                                class="select select-bordered"
                                prop:value=move || filters.with(|f| f.sort_order.as_str())
                                on:change=move |ev| {
                                    if let Some(order) = SortOrder::parse(&event_target_value(&ev)) {
                                        filters.update(|f| f.sort_order = order);
                                    }
                                }
                            >
                                {[SortOrder::Asc, SortOrder::Desc]
                                    .into_iter()
                                    .map(|order| view! { <option value=order.as_str()>{order.label()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                    </div>
                </div>
            </div>

            <ErrorBanner message=error_msg />
            {grid}
        </div>
    }
}
