use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Landing page after a schema request has been created.
#[component]
pub fn SchemaRequests() -> impl IntoView {
    let query = use_query_map();
    let status = move || query.with(|q| q.get("status")).unwrap_or_else(|| "ALL".to_string());

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-6">"My schema requests"</h2>
            <div class="bg-white rounded-lg shadow p-6">
                <p class="text-sm text-gray-600">
                    "Status: "
                    <span class="px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-blue-100 text-blue-800">
                        {status}
                    </span>
                </p>
                <p class="mt-4 text-gray-500">
                    "Requests are reviewed by an approver of the owning team."
                </p>
            </div>
        </div>
    }
}
