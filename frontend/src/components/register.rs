use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::route::AppRoute;
use storerate_shared::validation::{Field, RegisterForm, ValidationErrors};

use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, SuccessBanner, TextField, use_request_scope};
use crate::web::Timeout;
use crate::web::router::{Link, use_router};

/// Delay between a successful sign-up and the jump to the login page.
const REDIRECT_DELAY_MS: u32 = 2_000;

/// 注册表单状态
#[derive(Clone, Copy)]
struct FormState {
    name: RwSignal<String>,
    email: RwSignal<String>,
    address: RwSignal<String>,
    password: RwSignal<String>,
}

impl FormState {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
        }
    }

    fn snapshot(&self) -> RegisterForm {
        RegisterForm {
            name: self.name.get_untracked(),
            email: self.email.get_untracked(),
            address: self.address.get_untracked(),
            password: self.password.get_untracked(),
        }
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_request_scope();

    let form = FormState::new();
    let errors = RwSignal::new(ValidationErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);
    // Dropped with the page, which cancels a pending redirect.
    let redirect = StoredValue::new_local(None::<Timeout>);

    let field = move |f: Field| Signal::derive(move || errors.with(|e| e.get(f)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.snapshot().validate() {
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
            let result = auth.register(&request).await;
            ticket.apply(|| {
                match result {
                    Ok(()) => {
                        set_success_msg
                            .set(Some("Registration successful! Redirecting to login...".into()));
                        let timer = Timeout::new(REDIRECT_DELAY_MS, move || {
                            router.navigate(AppRoute::Login.to_path());
                        });
                        redirect.set_value(Some(timer));
                    }
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
                set_is_submitting.set(false);
            });
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-4">
                    <div class="text-5xl mb-2">"👋"</div>
                    <h1 class="text-3xl font-bold">"Create Account"</h1>
                    <p class="text-base-content/70">"Join our Store Rating community"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <ErrorBanner message=error_msg title="Registration Failed:" />
                        <SuccessBanner message=success_msg />

                        <TextField
                            id="name"
                            label="Full Name"
                            value=form.name
                            error=field(Field::Name)
                            placeholder="Enter your full name (20-60 characters)"
                            autocomplete="name"
                        />
                        <TextField
                            id="email"
                            label="Email Address"
                            kind="email"
                            value=form.email
                            error=field(Field::Email)
                            placeholder="Enter your email address"
                            autocomplete="email"
                        />
                        <TextField
                            id="address"
                            label="Address"
                            value=form.address
                            error=field(Field::Address)
                            placeholder="Enter your address (optional, max 400 characters)"
                            multiline=true
                        />
                        <TextField
                            id="password"
                            label="Password"
                            kind="password"
                            value=form.password
                            error=field(Field::Password)
                            placeholder="Create a strong password"
                            autocomplete="new-password"
                            help="8-16 characters with at least one uppercase letter and one special character"
                        />

                        <div class="form-control mt-6">
                            <button
                                class="btn btn-primary"
                                disabled=move || is_submitting.get() || success_msg.get().is_some()
                            >
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating Account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <p class="text-base-content/70">
                    "Already have an account? "
                    <Link to=AppRoute::Login.to_path() class="link link-primary font-semibold">
                        "Sign in here"
                    </Link>
                </p>
                <Link to=AppRoute::Home.to_path() class="btn btn-outline btn-sm">
                    "← Back to Home"
                </Link>
            </div>
        </div>
    }
}
