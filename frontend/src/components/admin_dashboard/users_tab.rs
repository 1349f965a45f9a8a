//! 用户管理标签页

use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::error::ApiResult;
use storerate::format::address_preview;
use storerate::logic::{ActionError, AdminLogic};
use storerate_shared::date::short_date_or_dash;
use storerate_shared::{RecordId, Role, SortOrder, User, UserFilters, UserSortField};

use super::create_dialogs::CreateUserDialog;
use super::{SectionHeader, filter_input};
use crate::auth::use_auth;
use crate::components::common::{EmptyState, ErrorBanner, Spinner, use_request_scope};
use crate::web::dialog;

const DELETE_PROMPT: &str = "Are you sure you want to delete this user? This action cannot be undone.";

fn badge_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "badge badge-error badge-outline font-semibold",
        Role::StoreOwner => "badge badge-info badge-outline font-semibold",
        Role::User => "badge badge-ghost font-semibold",
    }
}

#[component]
fn UserFiltersCard(filters: RwSignal<UserFilters>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <h3 class="card-title text-base">"🔍 Filter Users"</h3>
                <div class="grid gap-4 md:grid-cols-3 lg:grid-cols-6">
                    {filter_input("Name", "Search by name...", filters, |f: &UserFilters| f.name.clone(), |f, v| f.name = v)}
                    {filter_input("Email", "Search by email...", filters, |f: &UserFilters| f.email.clone(), |f, v| f.email = v)}
                    {filter_input("Address", "Search by address...", filters, |f: &UserFilters| f.address.clone(), |f, v| f.address = v)}
                    <label class="form-control">
                        <span class="label-text">"Role"</span>
                        <select
                            class="select select-bordered select-sm"
                            prop:value=move || filters.with(|f| f.role.map_or("", |r| r.as_str()))
                            on:change=move |ev| {
                                let role = Role::parse(&event_target_value(&ev));
                                filters.update(|f| f.role = role);
                            }
                        >
                            <option value="">"All Roles"</option>
                            {Role::ALL
                                .into_iter()
                                .map(|role| view! { <option value=role.as_str()>{role.badge_label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="form-control">
                        <span class="label-text">"Sort By"</span>
                        <select
                            class="select select-bordered select-sm"
                            prop:value=move || filters.with(|f| f.sort_by.as_str())
                            on:change=move |ev| {
                                if let Some(field) = UserSortField::parse(&event_target_value(&ev)) {
                                    filters.update(|f| f.sort_by = field);
                                }
                            }
                        >
                            {UserSortField::ALL
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
fn UserRow(user: User, on_delete: Callback<RecordId>) -> impl IntoView {
    let id = user.id;
    view! {
        <tr class="hover">
            <td>
                <div class="flex items-center gap-2">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content w-8 rounded-full text-sm">
                            <span>{user.initial()}</span>
                        </div>
                    </div>
                    <strong>{user.name.clone()}</strong>
                </div>
            </td>
            <td class="text-base-content/70">{user.email.clone()}</td>
            <td class="text-base-content/70">{address_preview(user.address.as_deref())}</td>
            <td>
                <span class=badge_class(user.role)>{user.role.badge_label()}</span>
            </td>
            <td class="text-base-content/70">{short_date_or_dash(user.created_at.as_ref())}</td>
            <td class="text-center">
                <button class="btn btn-error btn-xs" on:click=move |_| on_delete.run(id)>
                    "🗑️ Delete"
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn UsersTab() -> impl IntoView {
    let auth = use_auth();
    let scope = use_request_scope();

    let filters = RwSignal::new(UserFilters::default());
    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // Every list answer, first load or post-mutation reload, lands here.
    let on_list = Callback::new(move |result: ApiResult<Vec<User>>| {
        match result {
            Ok(list) => {
                set_users.set(list);
                set_error_msg.set(None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "user list fetch failed");
                set_error_msg.set(Some("Failed to fetch users".into()));
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
                let result = AdminLogic::new(&api).users(&current).await;
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
            match AdminLogic::new(&api).delete_user(id, &current).await {
                Ok(list) => {
                    ticket.apply(|| on_list.run(Ok(list)));
                }
                Err(ActionError::Reload(e)) => {
                    ticket.apply(|| on_list.run(Err(e)));
                }
                Err(ActionError::Action(e)) => {
                    tracing::warn!(user_id = id, error = %e, "user delete failed");
                    dialog::alert(&format!("Failed to delete user: {e}"));
                }
            }
        });
    });

    let table = move || {
        if loading.get() {
            return view! { <Spinner /> }.into_any();
        }
        let list = users.get();
        if list.is_empty() {
            return view! {
                <EmptyState icon="👥" title="No users found" detail="No users match the current filters." />
            }
            .into_any();
        }
        view! {
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Address"</th>
                            <th>"Role"</th>
                            <th>"Created"</th>
                            <th class="text-center">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .into_iter()
                            .map(|user| view! { <UserRow user=user on_delete=on_delete /> })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="space-y-6">
            <SectionHeader title="👥 User Management" subtitle="Manage all registered users" />
            <UserFiltersCard filters=filters />
            <ErrorBanner message=error_msg />
            <div class="card bg-base-100 shadow-md">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-4">
                        <h3 class="card-title">
                            "All Users (" {move || users.with(Vec::len)} ")"
                        </h3>
                        <CreateUserDialog filters=filters on_done=on_list />
                    </div>
                    {table}
                </div>
            </div>
        </div>
    }
}
