use leptos::prelude::*;
use leptos_router::components::A;

use crate::api;
use crate::auth::AuthContext;

#[component]
pub fn Dashboard() -> impl IntoView {
    let username = use_context::<AuthContext>()
        .map(|auth| auth.username)
        .unwrap_or_default();
    let topics = LocalResource::new(|| async move {
        api::get_topic_names()
            .await
            .map_err(|e| log::error!("Failed to load topic names: {}", e))
            .ok()
    });

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-2">"Dashboard"</h2>
            <p class="text-gray-600 mb-6">
                {if username.is_empty() { "Welcome".to_string() } else { format!("Welcome, {}", username) }}
            </p>

            <Suspense fallback=move || view! { <div class="text-gray-500">"Loading topics..."</div> }>
                {move || {
                    match topics.get() {
                        Some(Some(names)) if !names.is_empty() => view! {
                            <div class="bg-white rounded-lg shadow overflow-hidden">
                                <table class="min-w-full divide-y divide-gray-200">
                                    <thead class="bg-gray-50">
                                        <tr>
                                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Topic"</th>
                                            <th class="px-6 py-3 text-right text-xs font-medium text-gray-500 uppercase tracking-wider">"Actions"</th>
                                        </tr>
                                    </thead>
                                    <tbody class="bg-white divide-y divide-gray-200">
                                        {names.into_iter().map(|name| {
                                            let href = format!("/topic/{}/request-schema", urlencoding::encode(&name));
                                            view! {
                                                <tr class="hover:bg-gray-50">
                                                    <td class="px-6 py-4 whitespace-nowrap text-sm font-medium text-gray-900">{name}</td>
                                                    <td class="px-6 py-4 whitespace-nowrap text-right text-sm">
                                                        <A href=href attr:class="text-blue-600 hover:text-blue-900">"Request schema"</A>
                                                    </td>
                                                </tr>
                                            }
                                        }).collect::<Vec<_>>()}
                                    </tbody>
                                </table>
                            </div>
                        }.into_any(),
                        Some(Some(_)) => view! {
                            <div class="text-gray-500">"Your team has no topics yet."</div>
                        }.into_any(),
                        Some(None) => view! {
                            <div class="bg-red-50 border border-red-200 rounded-lg p-4">
                                <p class="text-red-800">
                                    <strong>"Failed to load topics."</strong>
                                    " Please check if the Klaw API is reachable."
                                </p>
                            </div>
                        }.into_any(),
                        None => view! {
                            <div class="text-gray-500">"Loading topics..."</div>
                        }.into_any(),
                    }
                }}
            </Suspense>
        </div>
    }
}
