//! 新建用户 / 新建商店对话框
//!
//! Both dialogs validate locally, issue the create call and hand the
//! re-fetched list to the owning tab. A failed create keeps the dialog open.

use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::error::ApiResult;
use storerate::logic::{ActionError, AdminLogic};
use storerate_shared::validation::{Field, ValidationErrors};
use storerate_shared::{AdminStoreFilters, Role, Store, User, UserFilters};

use super::form_state::{StoreFormState, UserFormState};
use crate::auth::use_auth;
use crate::components::common::{FieldError, TextField, use_request_scope};
use crate::web::dialog;

#[component]
fn Modal(
    open: RwSignal<bool>,
    title: &'static str,
    subtitle: &'static str,
    children: Children,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box max-w-lg">
                <h3 class="font-bold text-lg">{title}</h3>
                <p class="py-2 text-base-content/70">{subtitle}</p>
                {children()}
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

#[component]
fn ModalActions(open: RwSignal<bool>, saving: ReadSignal<bool>, label: &'static str) -> impl IntoView {
    view! {
        <div class="modal-action">
            <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                "Cancel"
            </button>
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                {move || if saving.get() {
                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                } else {
                    label.into_any()
                }}
            </button>
        </div>
    }
}

#[component]
pub fn CreateUserDialog(
    filters: RwSignal<UserFilters>,
    on_done: Callback<ApiResult<Vec<User>>>,
) -> impl IntoView {
    let auth = use_auth();
    let scope = use_request_scope();
    let open = RwSignal::new(false);
    let (saving, set_saving) = signal(false);
    let state = UserFormState::new();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match state.to_form().validate() {
            Ok(request) => request,
            Err(found) => {
                state.errors.set(found);
                return;
            }
        };
        state.errors.set(ValidationErrors::new());
        set_saving.set(true);

        let current = filters.get_untracked();
        let ticket = scope.begin();
        spawn_local(async move {
            let api = auth.api();
            let result = AdminLogic::new(&api).create_user(&request, &current).await;
            ticket.apply(|| {
                set_saving.set(false);
                let reloaded = match result {
                    Ok(list) => Ok(list),
                    Err(ActionError::Reload(e)) => Err(e),
                    Err(ActionError::Action(e)) => {
                        dialog::alert(&format!("Failed to create user: {e}"));
                        return;
                    }
                };
                open.set(false);
                state.reset();
                on_done.run(reloaded);
            });
        });
    };

    view! {
        <button class="btn btn-primary btn-sm" on:click=move |_| open.set(true)>
            "➕ Add User"
        </button>

        <Modal open=open title="Add New User" subtitle="Create an account with any role.">
            <form class="space-y-2" on:submit=on_submit novalidate>
                <TextField
                    id="new_user_name"
                    label="Full Name"
                    value=state.name
                    error=state.error(Field::Name)
                    placeholder="20-60 characters"
                />
                <TextField
                    id="new_user_email"
                    label="Email Address"
                    kind="email"
                    value=state.email
                    error=state.error(Field::Email)
                    placeholder="user@example.com"
                />
                <TextField
                    id="new_user_address"
                    label="Address"
                    value=state.address
                    error=state.error(Field::Address)
                    placeholder="Optional, max 400 characters"
                    multiline=true
                />
                <TextField
                    id="new_user_password"
                    label="Password"
                    kind="password"
                    value=state.password
                    error=state.error(Field::Password)
                    autocomplete="new-password"
                    help="8-16 characters with at least one uppercase letter and one special character"
                />
                <div class="form-control w-full">
                    <label class="label" for="new_user_role">
                        <span class="label-text">"Role"</span>
                    </label>
                    <select
                        id="new_user_role"
                        class="select select-bordered w-full"
                        prop:value=move || state.role.get().map_or("", |r| r.as_str())
                        on:change=move |ev| state.role.set(Role::parse(&event_target_value(&ev)))
                    >
                        <option value="">"Select a role"</option>
                        {Role::ALL
                            .into_iter()
                            .map(|role| view! { <option value=role.as_str()>{role.badge_label()}</option> })
                            .collect_view()}
                    </select>
                    <div class="label">
                        <FieldError message=state.error(Field::Role) />
                    </div>
                </div>

                <ModalActions open=open saving=saving label="Create User" />
            </form>
        </Modal>
    }
}

#[component]
pub fn CreateStoreDialog(
    filters: RwSignal<AdminStoreFilters>,
    on_done: Callback<ApiResult<Vec<Store>>>,
) -> impl IntoView {
    let auth = use_auth();
    let scope = use_request_scope();
    let open = RwSignal::new(false);
    let (saving, set_saving) = signal(false);
    let state = StoreFormState::new();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match state.to_form().validate() {
            Ok(request) => request,
            Err(found) => {
                state.errors.set(found);
                return;
            }
        };
        state.errors.set(ValidationErrors::new());
        set_saving.set(true);

        let current = filters.get_untracked();
        let ticket = scope.begin();
        spawn_local(async move {
            let api = auth.api();
            let result = AdminLogic::new(&api).create_store(&request, &current).await;
            ticket.apply(|| {
                set_saving.set(false);
                let reloaded = match result {
                    Ok(list) => Ok(list),
                    Err(ActionError::Reload(e)) => Err(e),
                    Err(ActionError::Action(e)) => {
                        dialog::alert(&format!("Failed to create store: {e}"));
                        return;
                    }
                };
                open.set(false);
                state.reset();
                on_done.run(reloaded);
            });
        });
    };

    view! {
        <button class="btn btn-primary btn-sm" on:click=move |_| open.set(true)>
            "➕ Add Store"
        </button>

        <Modal open=open title="Add New Store" subtitle="Register a store and optionally assign its owner.">
            <form class="space-y-2" on:submit=on_submit novalidate>
                <TextField
                    id="new_store_name"
                    label="Store Name"
                    value=state.name
                    error=state.error(Field::Name)
                    placeholder="Max 60 characters"
                />
                <TextField
                    id="new_store_email"
                    label="Contact Email"
                    kind="email"
                    value=state.email
                    error=state.error(Field::Email)
                    placeholder="store@example.com"
                />
                <TextField
                    id="new_store_address"
                    label="Address"
                    value=state.address
                    error=state.error(Field::Address)
                    placeholder="Max 400 characters"
                    multiline=true
                />
                <TextField
                    id="new_store_owner"
                    label="Owner ID"
                    kind="number"
                    value=state.owner_id
                    error=state.error(Field::OwnerId)
                    help="Leave blank to create the store without an owner"
                />

                <ModalActions open=open saving=saving label="Create Store" />
            </form>
        </Modal>
    }
}
