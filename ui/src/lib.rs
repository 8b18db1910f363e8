use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

mod api;
mod auth;
mod components;
mod feature_flags;
mod navigation;
mod route_utils;
mod routes;
mod schema_request;
mod toast;
mod types;

use auth::AuthContext;
use feature_flags::FeatureFlags;
use route_utils::AppRoute;
use routes::{console_routes, RouteTable};
use toast::{ToastRegion, Toaster};
use types::{AuthenticationInfo, ConsoleConfig};

#[component]
pub fn App() -> impl IntoView {
    provide_context(Toaster::new());

    let console_config = LocalResource::new(|| async move {
        api::get_console_config()
            .await
            .map_err(|e| log::error!("Failed to load console config, all feature flags off: {}", e))
            .unwrap_or_default()
    });
    let auth = LocalResource::new(|| async move {
        api::get_auth()
            .await
            .map_err(|e| log::error!("Failed to load authentication info: {}", e))
            .unwrap_or_default()
    });

    view! {
        <Router>
            <div class="flex h-screen bg-gray-100">
                // Sidebar
                <div class="w-64 bg-gray-800 text-white p-4 flex flex-col">
                    <h1 class="text-2xl font-bold mb-8">"Klaw"</h1>
                    <nav class="space-y-1 flex-1">
                        <NavLink href="/" label="Dashboard" />
                        <NavLink href="/requests/schemas" label="My requests" />
                    </nav>
                </div>

                // Main Content
                <div class="flex-1 overflow-y-auto">
                    <Suspense fallback=|| view! { <div class="p-6 text-gray-500">"Loading..."</div> }>
                        {move || {
                            let config = console_config.get()?;
                            let auth = auth.get()?;
                            Some(view! { <Console config=config auth=auth/> })
                        }}
                    </Suspense>
                </div>
            </div>
            <ToastRegion/>
        </Router>
    }
}

/// Routes for the signed-in session. Feature flags are read once, here.
#[component]
fn Console(config: ConsoleConfig, auth: AuthenticationInfo) -> impl IntoView {
    provide_context(AuthContext::new(&auth));

    let table = Arc::new(RouteTable::new(console_routes(&FeatureFlags::from_config(&config))));
    let render = move |route: AppRoute| {
        let table = table.clone();
        move || table.render(route)
    };

    view! {
        <Routes fallback=|| "Not found.">
            <Route path=path!("/") view=render(AppRoute::Home)/>
            <Route path=path!("/topic/:topic_name/request-schema") view=render(AppRoute::TopicSchemaRequest)/>
            <Route path=path!("/requests/schemas") view=render(AppRoute::SchemaRequests)/>
        </Routes>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href attr:class="block p-2 hover:bg-gray-700 rounded transition-colors">
            {label}
        </A>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    leptos::mount::mount_to_body(App);
}
