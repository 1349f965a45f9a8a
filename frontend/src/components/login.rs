use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::route::{AppRoute, home_for};
use storerate_shared::validation::{Field, LoginForm, ValidationErrors};

use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, TextField, use_request_scope};
use crate::web::router::{Link, use_router};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_request_scope();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let field = move |f: Field| Signal::derive(move || errors.with(|e| e.get(f)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get_untracked(),
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

        let ticket = scope.begin();
        spawn_local(async move {
            let result = auth.login(&request.email, &request.password).await;
            ticket.apply(|| {
                match result {
                    Ok(user) => router.replace(home_for(user.role).to_path()),
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
                set_is_submitting.set(false);
            });
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="text-5xl mb-2">"🏪"</div>
                    <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                    <p class="text-base-content/70">"Sign in to your Store Rating account"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <ErrorBanner message=error_msg title="Login Failed:" />

                        <TextField
                            id="email"
                            label="Email Address"
                            kind="email"
                            value=email
                            error=field(Field::Email)
                            placeholder="Enter your email"
                            autocomplete="email"
                        />
                        <TextField
                            id="password"
                            label="Password"
                            kind="password"
                            value=password
                            error=field(Field::Password)
                            placeholder="Enter your password"
                            autocomplete="current-password"
                        />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <p class="text-base-content/70">
                    "Don't have an account? "
                    <Link to=AppRoute::Register.to_path() class="link link-primary font-semibold">
                        "Create one here"
                    </Link>
                </p>
                <Link to=AppRoute::Home.to_path() class="btn btn-outline btn-sm">
                    "← Back to Home"
                </Link>
            </div>
        </div>
    }
}
