//! 商店管理标签页

use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::error::ApiResult;
use storerate::format::{address_preview, average_or, owner_label, rating_count};
use storerate::logic::{ActionError, AdminLogic};
use storerate_shared::{AdminStoreFilters, RecordId, SortOrder, Store, StoreSortField};

use super::create_dialogs::CreateStoreDialog;
use super::{SectionHeader, filter_input};
use crate::auth::use_auth;
use crate::components::common::{EmptyState, ErrorBanner, Spinner, use_request_scope};
use crate::web::dialog;

const DELETE_PROMPT: &str = "Are you sure you want to delete this store? This action cannot be undone.";

#[component]
fn StoreFiltersCard(filters: RwSignal<AdminStoreFilters>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <h3 class="card-title text-base">"🔍 Filter Stores"</h3>
                <div class="grid gap-4 md:grid-cols-3 lg:grid-cols-5">
                    {filter_input("Name", "Search by name...", filters, |f: &AdminStoreFilters| f.name.clone(), |f, v| f.name = v)}
                    {filter_input("Email", "Search by email...", filters, |f: &AdminStoreFilters| f.email.clone(), |f, v| f.email = v)}
                    {filter_input("Address", "Search by address...", filters, |f: &AdminStoreFilters| f.address.clone(), |f, v| f.address = v)}
                    <label class="form-control">
                        <span class="label-text">"Sort By"</span>
                        <select
                            class="select select-bordered select-sm"
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
                            class="select select-bordered select-sm"
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
    }
}

#[component]
fn StoreRow(store: Store, on_delete: Callback<RecordId>) -> impl IntoView {
    let id = store.id;
    view! {
        <tr class="hover">
            <td>
                <strong>{store.name.clone()}</strong>
                <div class="text-xs text-base-content/50">"ID: " {id}</div>
            </td>
            <td class="text-base-content/70">{store.email.clone()}</td>
            <td class="text-base-content/70">{address_preview(Some(store.address.as_str()))}</td>
            <td class="text-center">
                <strong>{average_or(store.average_rating, "N/A")}</strong>
                " ⭐"
                <div class="text-xs text-base-content/50">{rating_count(store.total_ratings)}</div>
            </td>
            <td class="text-base-content/70">{owner_label(&store).to_string()}</td>
            <td class="text-center">
                <button class="btn btn-error btn-xs" on:click=move |_| on_delete.run(id)>
                    "🗑️ Delete"
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn StoresTab() -> impl IntoView {
    let auth = use_auth();
    let scope = use_request_scope();

    let filters = RwSignal::new(AdminStoreFilters::default());
    let (stores, set_stores) = signal(Vec::<Store>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_list = Callback::new(move |result: ApiResult<Vec<Store>>| {
        match result {
            Ok(list) => {
                set_stores.set(list);
                set_error_msg.set(None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "admin store list fetch failed");
                set_error_msg.set(Some("Failed to fetch stores".into()));
            }
        }
        set_loading.set(false);
    });

    Effect::new({
        let scope = scope.clone();
        move |_| {
            let current = filters.get();
            set_loading.set(true);
            let ticket = scope.begin();
            spawn_local(async move {
                let api = auth.api();
                let result = AdminLogic::new(&api).stores(&current).await;
                ticket.apply(|| on_list.run(result));
            });
        }
    });

    let on_delete = Callback::new(move |id: RecordId| {
        if !dialog::confirm(DELETE_PROMPT) {
            return;
        }
        let current = filters.get_untracked();
        let ticket = scope.begin();
        spawn_local(async move {
            let api = auth.api();
            match AdminLogic::new(&api).delete_store(id, &current).await {
                Ok(list) => {
                    ticket.apply(|| on_list.run(Ok(list)));
                }
                Err(ActionError::Reload(e)) => {
                    ticket.apply(|| on_list.run(Err(e)));
                }
                Err(ActionError::Action(e)) => {
                    tracing::warn!(store_id = id, error = %e, "store delete failed");
                    dialog::alert(&format!("Failed to delete store: {e}"));
                }
            }
        });
    });

    let table = move || {
        if loading.get() {
            return view! { <Spinner /> }.into_any();
        }
        let list = stores.get();
        if list.is_empty() {
            return view! {
                <EmptyState icon="🏪" title="No stores found" detail="No stores match the current filters." />
            }
            .into_any();
        }
        view! {
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Store"</th>
                            <th>"Contact"</th>
                            <th>"Location"</th>
                            <th class="text-center">"Rating"</th>
                            <th>"Owner"</th>
                            <th class="text-center">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .into_iter()
                            .map(|store| view! { <StoreRow store=store on_delete=on_delete /> })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="space-y-6">
            <SectionHeader title="🏪 Store Management" subtitle="Manage all registered stores" />
            <StoreFiltersCard filters=filters />
            <ErrorBanner message=error_msg />
            <div class="card bg-base-100 shadow-md">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-4">
                        <h3 class="card-title">
                            "All Stores (" {move || stores.with(Vec::len)} ")"
                        </h3>
                        <CreateStoreDialog filters=filters on_done=on_list />
                    </div>
                    {table}
                </div>
            </div>
        </div>
    }
}
