use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::format::address_preview;
use storerate_shared::validation::{Field, PasswordForm, ValidationErrors};

use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, SuccessBanner, TextField, use_request_scope};

const SECURITY_TIPS: [&str; 4] = [
    "Use a strong, unique password",
    "Don't share your password with others",
    "Update your password regularly",
    "Log out from shared devices",
];

#[component]
fn PersonalInfo() -> impl IntoView {
    let auth = use_auth();
    move || {
        auth.user().map(|user| {
            let role = user.role;
            view! {
                <div class="text-center mb-6">
                    <div class="avatar placeholder mb-3">
                        <div class="bg-primary text-primary-content w-20 rounded-full text-3xl">
                            <span>{user.initial()}</span>
                        </div>
                    </div>
                    <h4 class="text-xl font-semibold">{user.name.clone()}</h4>
                    <div class="badge badge-lg badge-ghost gap-1 mt-2">
                        {role.icon()} " " {role.display_name()}
                    </div>
                </div>
                <div class="grid gap-4 md:grid-cols-2">
                    <div class="p-4 rounded-box bg-base-200">
                        <p class="label-text mb-1">"📧 Email Address"</p>
                        <p class="font-semibold text-primary break-all">{user.email.clone()}</p>
                    </div>
                    <div class="p-4 rounded-box bg-base-200">
                        <p class="label-text mb-1">"📍 Address"</p>
                        <p class="text-base-content/70">
                            {user.address.clone().unwrap_or_else(|| address_preview(None))}
                        </p>
                    </div>
                </div>
                <div role="alert" class="alert alert-info mt-4">
                    <div>
                        <h5 class="font-semibold">"ℹ️ Account Status"</h5>
                        <p class="text-sm">
                            "Your account is active and verified. You have full access to all features available for your role."
                        </p>
                    </div>
                </div>
            }
        })
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_request_scope();

    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    // Pick up changes made elsewhere (an admin editing this account).
    let ticket = scope.begin();
    spawn_local(async move {
        if let Err(e) = auth.refresh_profile().await {
            ticket.apply(|| tracing::warn!(error = %e, "profile refresh failed"));
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = PasswordForm {
            password: password.get_untracked(),
        };
        let request = match form.validate() {
            Ok(request) => request,
            Err(found) => {
                errors.set(found);
                return;
            }
        };
        errors.set(ValidationErrors::new());
        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_success_msg.set(None);

        let ticket = scope.begin();
        spawn_local(async move {
            let result = auth.update_password(&request.password).await;
            ticket.apply(|| {
                match result {
                    Ok(()) => {
                        set_success_msg.set(Some("Password updated successfully!".into()));
                        password.set(String::new());
                    }
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
                set_is_submitting.set(false);
            });
        });
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8 space-y-8">
            <div class="text-center">
                <h1 class="text-3xl font-bold">"👤 User Profile"</h1>
                <p class="text-base-content/70">"Manage your account information and settings"</p>
            </div>

            <div class="grid gap-6 lg:grid-cols-2">
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body">
                        <h3 class="card-title">"📋 Personal Information"</h3>
                        <PersonalInfo />
                    </div>
                </div>

                <div class="card bg-base-100 shadow-md">
                    <div class="card-body">
                        <h3 class="card-title">"🔒 Security Settings"</h3>
                        <ErrorBanner message=error_msg title="Update Failed:" />
                        <SuccessBanner message=success_msg />

                        <form on:submit=on_submit novalidate>
                            <TextField
                                id="password"
                                label="🔑 New Password"
                                kind="password"
                                value=password
                                error=Signal::derive(move || errors.with(|e| e.get(Field::Password)))
                                placeholder="Enter your new password"
                                autocomplete="new-password"
                                help="Password must be 8-16 characters with at least one uppercase letter and one special character"
                            />
                            <button class="btn btn-primary w-full mt-4" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Updating Password..." }.into_any()
                                } else {
                                    "🔄 Update Password".into_any()
                                }}
                            </button>
                        </form>

                        <div class="mt-6 p-4 rounded-box bg-base-200">
                            <h5 class="font-semibold mb-2">"🛡️ Security Tips"</h5>
                            <ul class="list-disc list-inside text-sm text-base-content/70">
                                {SECURITY_TIPS.iter().map(|tip| view! { <li>{*tip}</li> }).collect_view()}
                            </ul>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
