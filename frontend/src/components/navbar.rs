use leptos::prelude::*;
use storerate::nav::{NavItem, nav_items};
use storerate::route::AppRoute;

use crate::auth::use_auth;
use crate::web::router::{Link, use_router};

#[component]
fn NavLink(item: NavItem, on_navigate: Callback<()>) -> impl IntoView {
    let router = use_router();
    let class = move || {
        let path = router.current_path().get();
        let mut class = String::from(if item.emphasized { "btn btn-primary btn-sm" } else { "btn btn-ghost btn-sm" });
        if item.is_active(&path) {
            class.push_str(" btn-active");
        }
        class
    };
    view! {
        <li>
            <Link to=item.href() class=Signal::derive(class) on_navigate=on_navigate>
                {item.icon.map(|icon| view! { <span>{icon}</span> })}
                {item.label}
            </Link>
        </li>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let (menu_open, set_menu_open) = signal(false);
    let close_menu = Callback::new(move |_| set_menu_open.set(false));

    let on_logout = move |_| {
        auth.logout();
        set_menu_open.set(false);
    };

    let user_info = move || {
        auth.user().map(|user| {
            view! {
                <li class="flex flex-row items-center gap-2 px-2">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content w-8 rounded-full">
                            <span>{user.initial().to_string()}</span>
                        </div>
                    </div>
                    <div class="flex flex-col leading-tight">
                        <span class="font-semibold text-sm">{user.name.clone()}</span>
                        <span class="text-xs text-base-content/60">{user.role.nav_label()}</span>
                    </div>
                </li>
            }
        })
    };

    let links = move || {
        nav_items(auth.role())
            .into_iter()
            .map(|item| view! { <NavLink item=item on_navigate=close_menu /> })
            .collect_view()
    };

    let logout = move || {
        auth.is_authenticated().then(|| {
            view! {
                <li>
                    <button class="btn btn-ghost btn-sm text-error" on:click=on_logout>
                        <span>"🚪"</span>
                        "Logout"
                    </button>
                </li>
            }
        })
    };

    view! {
        <nav class="navbar bg-base-100 shadow-sm sticky top-0 z-30">
            <div class="flex-1">
                <Link to=AppRoute::Home.to_path() class="btn btn-ghost text-xl" on_navigate=close_menu>
                    <span>"⭐"</span>
                    <span>"Store Rating System"</span>
                </Link>
            </div>

            <div class="flex-none lg:hidden">
                <button
                    class="btn btn-square btn-ghost"
                    aria-label="Toggle navigation menu"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    <svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" class="inline-block h-6 w-6 stroke-current">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"></path>
                    </svg>
                </button>
            </div>

            <div class="flex-none hidden lg:flex">
                <ul class="menu menu-horizontal items-center gap-1 px-1">
                    {user_info}
                    {links}
                    {logout}
                </ul>
            </div>

            <Show when=move || menu_open.get()>
                <div class="fixed inset-0 bg-black/30 lg:hidden" on:click=move |_| set_menu_open.set(false)></div>
                <ul class="menu bg-base-100 rounded-box shadow-lg absolute right-2 top-16 w-64 z-40 lg:hidden">
                    {user_info}
                    {links}
                    {logout}
                </ul>
            </Show>
        </nav>
    }
}
