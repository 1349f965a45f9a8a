//! 管理后台页面
//!
//! Three tabs, each a component with its own request scope, so switching
//! tabs drops whatever the previous tab still had in flight.

mod create_dialogs;
mod form_state;
mod stores_tab;
mod users_tab;

use leptos::prelude::*;
use leptos::task::spawn_local;
use storerate::logic::AdminLogic;
use storerate_shared::DashboardStats;

use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, Spinner, use_request_scope};
use stores_tab::StoresTab;
use users_tab::UsersTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Dashboard,
    Users,
    Stores,
}

impl AdminTab {
    const ALL: [AdminTab; 3] = [AdminTab::Dashboard, AdminTab::Users, AdminTab::Stores];

    fn label(&self) -> &'static str {
        match self {
            AdminTab::Dashboard => "📊 Dashboard",
            AdminTab::Users => "👥 Users",
            AdminTab::Stores => "🏪 Stores",
        }
    }
}

#[component]
fn SectionHeader(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="text-center">
            <h2 class="text-2xl font-bold">{title}</h2>
            <p class="text-base-content/70">{subtitle}</p>
        </div>
    }
}

/// Text search input writing one field of a filter struct.
fn filter_input<F>(
    label: &'static str,
    placeholder: &'static str,
    filters: RwSignal<F>,
    read: fn(&F) -> String,
    write: fn(&mut F, String),
) -> impl IntoView
where
    F: Send + Sync + 'static,
{
    view! {
        <label class="form-control">
            <span class="label-text">{label}</span>
            <input
                type="text"
                class="input input-bordered input-sm"
                placeholder=placeholder
                prop:value=move || filters.with(read)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filters.update(|f| write(f, value));
                }
            />
        </label>
    }
}

#[component]
fn StatCard(icon: &'static str, title: &'static str, value: u64, accent: &'static str) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body items-center text-center">
                <div class="text-4xl">{icon}</div>
                <h3 class="card-title">{title}</h3>
                <p class=format!("text-3xl font-bold {accent}")>{value}</p>
            </div>
        </div>
    }
}

#[component]
fn OverviewTab() -> impl IntoView {
    let auth = use_auth();
    let scope = use_request_scope();
    let (stats, set_stats) = signal(Option::<DashboardStats>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let ticket = scope.begin();
    spawn_local(async move {
        let api = auth.api();
        let result = AdminLogic::new(&api).stats().await;
        ticket.apply(|| {
            match result {
                Ok(found) => set_stats.set(Some(found)),
                Err(e) => {
                    tracing::warn!(error = %e, "dashboard stats fetch failed");
                    set_error_msg.set(Some("Failed to fetch dashboard stats".into()));
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="space-y-6">
            <SectionHeader title="📊 Dashboard Overview" subtitle="Real-time statistics and insights" />
            <ErrorBanner message=error_msg />
            {move || {
                if loading.get() {
                    return view! { <Spinner /> }.into_any();
                }
                stats
                    .get()
                    .map(|s| {
                        view! {
                            <div class="grid gap-6 md:grid-cols-3">
                                <StatCard icon="👥" title="Total Users" value=s.total_users accent="text-primary" />
                                <StatCard icon="🏪" title="Total Stores" value=s.total_stores accent="text-success" />
                                <StatCard icon="⭐" title="Total Ratings" value=s.total_ratings accent="text-warning" />
                            </div>
                        }
                    })
                    .into_any()
            }}
        </div>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let (tab, set_tab) = signal(AdminTab::Dashboard);

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8 space-y-8">
            <div role="tablist" class="tabs tabs-boxed bg-base-100 shadow-sm p-2">
                {AdminTab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                role="tab"
                                class=move || if tab.get() == t { "tab tab-active flex-1" } else { "tab flex-1" }
                                on:click=move |_| set_tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            {move || match tab.get() {
                AdminTab::Dashboard => view! { <OverviewTab /> }.into_any(),
                AdminTab::Users => view! { <UsersTab /> }.into_any(),
                AdminTab::Stores => view! { <StoresTab /> }.into_any(),
            }}
        </div>
    }
}
