//! Page for requesting a new schema on an existing topic

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use crate::api;
use crate::navigation::{use_navigator, Navigation, Navigator};
use crate::toast::use_toaster;
use crate::types::{Environment, SchemaType};

use super::form::{CancelAction, CancelDialogChoice, ErrorSlot, Field, FieldErrors, SchemaRequestForm};
use super::preflight::{check_preflight, environment_options, Preflight};
use super::submission::{Submission, SubmissionState, COMPATIBILITY_WARNING};

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-lg focus:ring-blue-500 focus:border-blue-500 disabled:bg-gray-100 disabled:text-gray-500";
const LABEL_CLASS: &str = "block text-sm font-medium text-gray-700 mb-1";
const ERROR_CLASS: &str = "mt-1 text-sm text-red-600";

/// Route entry: reads `:topic_name` from the path.
#[component]
pub fn TopicSchemaRequestPage() -> impl IntoView {
    let params = use_params_map();
    let topic_name = params.with_untracked(|p| p.get("topic_name")).unwrap_or_default();

    view! { <TopicSchemaRequest preset_topic_name=topic_name/> }
}

#[component]
pub fn TopicSchemaRequest(#[prop(into)] preset_topic_name: String) -> impl IntoView {
    let env_query = use_query_map().with_untracked(|q| q.get("env"));
    let navigator = use_navigator();
    let toaster = use_toaster();

    let topic_names = LocalResource::new(|| async move {
        api::get_topic_names()
            .await
            .map_err(|e| log::error!("Failed to load topic names: {}", e))
            .ok()
    });
    let environments = LocalResource::new(|| async move {
        api::get_all_environments_for_topic_and_acl()
            .await
            .map_err(|e| log::error!("Failed to load environments: {}", e))
            .ok()
    });

    let environment_list = Memo::new(move |_| environments.get().flatten());
    let options = Memo::new(move |_| {
        environment_list.with(|list| list.as_deref().map(environment_options).unwrap_or_default())
    });
    let preflight = {
        let preset_topic_name = preset_topic_name.clone();
        Memo::new(move |_| {
            let names = topic_names.get().flatten();
            environment_list.with(|envs| {
                check_preflight(
                    &preset_topic_name,
                    env_query.as_deref(),
                    names.as_deref(),
                    envs.as_deref(),
                )
            })
        })
    };

    let form = RwSignal::new(SchemaRequestForm::new(preset_topic_name.clone()));
    let submission = RwSignal::new(Submission::default());
    let (show_cancel_dialog, set_show_cancel_dialog) = signal(false);

    Effect::new(move |_| match preflight.get() {
        Preflight::GoBack(mismatch) => {
            log::warn!("Schema request preflight failed: {:?}", mismatch);
            navigator.navigate(Navigation::Back);
        }
        Preflight::Proceed {
            locked_environment: Some(environment),
        } => form.update(|f| f.lock_environment(environment.id)),
        Preflight::Proceed { .. } | Preflight::Pending => {}
    });

    let errors = move || form.with(|f| options.with(|o| f.visible_errors(o)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.update(|f| f.mark_submitted());

        let checked = preflight.get_untracked();
        let attempt = options.with_untracked(|o| {
            form.with_untracked(|f| submission.try_update(|s| s.begin(f, o, &checked)))
        });
        let payload = match attempt {
            Some(Ok(payload)) => payload,
            Some(Err(refused)) => {
                log::debug!("Schema request not sent: {:?}", refused);
                return;
            }
            None => return,
        };

        wasm_bindgen_futures::spawn_local(async move {
            let result = api::request_schema_creation(&payload).await;
            if let Some(completion) = submission.try_update(|s| s.finish(result)) {
                completion.announce(&toaster, &navigator);
            }
        });
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            form.update(|f| f.touch(Field::SchemaFile));
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(file.text()).await {
                Ok(text) => match text.as_string() {
                    Some(contents) => {
                        form.try_update(|f| f.set_schemafull(contents));
                    }
                    None => log::error!("Schema file {} is not text", file.name()),
                },
                Err(e) => log::error!("Failed to read schema file {}: {:?}", file.name(), e),
            }
        });
    };

    let on_cancel = move |_| match form.with_untracked(|f| f.cancel_action()) {
        CancelAction::NavigateBack => navigator.navigate(Navigation::Back),
        CancelAction::Confirm => set_show_cancel_dialog.set(true),
    };

    view! {
        <div class="p-6 max-w-4xl mx-auto">
            <h2 class="text-2xl font-bold mb-6">"Request a new schema"</h2>

            {move || submission.with(|s| s.error_message().map(str::to_string)).map(|message| view! {
                <div role="alert" class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded mb-6">
                    {message}
                </div>
            })}

            <Show when=move || preflight.with(Preflight::renders_form)>
            <form
                aria-label="Request a new schema"
                on:submit=on_submit
                class="bg-white rounded-lg shadow p-6"
                novalidate=true
            >
                <div class="space-y-6">
                    // Environment
                    <div>
                        <label for="environment" class=LABEL_CLASS>
                            "Environment" <span class="text-red-600">" *"</span>
                        </label>
                        <Show
                            when=move || environment_list.with(|list| list.is_some())
                            fallback=|| view! {
                                <div
                                    data-testid="async-select-loading-environments"
                                    class="h-10 rounded-lg bg-gray-100 animate-pulse"
                                ></div>
                            }
                        >
                            <select
                                id="environment"
                                name="environment"
                                class=INPUT_CLASS
                                required=true
                                disabled=move || form.with(|f| f.environment_locked())
                                title=move || form.with(|f| options.with(|o| f.locked_environment_label(o).map(str::to_string)))
                                aria-invalid=move || errors().environment.is_some().to_string()
                                on:change=move |ev| form.update(|f| f.select_environment(&event_target_value(&ev)))
                                on:blur=move |_| form.update(|f| f.touch(Field::Environment))
                            >
                                <Show when=move || !form.with(|f| f.environment_locked())>
                                    <option value="">"-- Please select --"</option>
                                </Show>
                                {move || {
                                    form.with(|f| options.with(|o| f.selector_options(o)))
                                        .into_iter()
                                        .map(|env| environment_option(env, form))
                                        .collect::<Vec<_>>()
                                }}
                            </select>
                        </Show>
                        {move || field_error(errors(), ErrorSlot::EnvironmentSelect)}
                    </div>

                    // Topic name
                    <div>
                        <label for="topicname" class=LABEL_CLASS>"Topic name (read-only)"</label>
                        <select id="topicname" name="topicname" class=INPUT_CLASS disabled=true aria-readonly="true">
                            <option value=preset_topic_name.clone() selected=true>{preset_topic_name.clone()}</option>
                        </select>
                    </div>

                    // Schema file
                    <div>
                        <label for="schema-file" class=LABEL_CLASS>
                            "Upload AVRO Schema" <span class="text-red-600">" *"</span>
                        </label>
                        <input
                            id="schema-file"
                            name="schema-file"
                            type="file"
                            accept=".avsc,.json"
                            required=true
                            class="block w-full text-sm text-gray-700"
                            aria-invalid=move || errors().schema_file.is_some().to_string()
                            on:change=on_file_change
                            on:blur=move |_| form.update(|f| f.touch(Field::SchemaFile))
                        />
                        {move || field_error(errors(), ErrorSlot::SchemaUpload)}
                    </div>

                    // Schema type
                    <fieldset>
                        <legend class=LABEL_CLASS>"Schema type"</legend>
                        <div class="flex gap-6">
                            {[SchemaType::Avro, SchemaType::Json].into_iter().map(|schema_type| view! {
                                <label class="flex items-center gap-2 text-sm">
                                    <input
                                        type="radio"
                                        name="schemaType"
                                        value=schema_type.as_str()
                                        prop:checked=move || form.with(|f| f.values().schema_type == schema_type)
                                        on:change=move |_| form.update(|f| f.set_schema_type(schema_type))
                                    />
                                    {schema_type.as_str()}
                                </label>
                            }).collect::<Vec<_>>()}
                        </div>
                    </fieldset>

                    // Preview
                    <div>
                        <label for="topic-schema" class=LABEL_CLASS>"Preview for your schema"</label>
                        <textarea
                            id="topic-schema"
                            data-testid="topic-schema"
                            class=format!("{} font-mono text-sm", INPUT_CLASS)
                            rows=12
                            readonly=true
                            prop:value=move || form.with(|f| f.values().schemafull.clone().unwrap_or_default())
                        ></textarea>
                        {move || field_error(errors(), ErrorSlot::SchemaPreview)}
                    </div>

                    // Remarks
                    <div>
                        <label for="remarks" class=LABEL_CLASS>"Message for approval"</label>
                        <textarea
                            id="remarks"
                            name="remarks"
                            class=INPUT_CLASS
                            rows=3
                            placeholder="Comments about this request for the approver."
                            prop:value=move || form.with(|f| f.values().remarks.clone())
                            on:input=move |ev| form.update(|f| f.set_remarks(event_target_value(&ev)))
                        ></textarea>
                    </div>

                    // Force register, offered after a compatibility rejection
                    <Show when=move || submission.with(|s| s.awaiting_force_register())>
                        <div class="space-y-3">
                            <Show when=move || submission.with(|s| *s.state() == SubmissionState::CompatibilityWarning)>
                                <div role="alert" class="bg-yellow-50 border border-yellow-200 text-yellow-800 px-4 py-3 rounded">
                                    {COMPATIBILITY_WARNING}
                                </div>
                            </Show>
                            <label class="flex items-start gap-2">
                                <input
                                    type="checkbox"
                                    name="forceRegister"
                                    class="mt-1"
                                    prop:checked=move || form.with(|f| f.values().force_register)
                                    on:change=move |ev| form.update(|f| f.set_force_register(event_target_checked(&ev)))
                                />
                                <span>
                                    <span class="block text-sm font-medium">"Force register schema creation/changes"</span>
                                    <span class="block text-sm text-gray-600">
                                        "Warning: This will override standard validation process of the schema registry."
                                    </span>
                                </span>
                            </label>
                        </div>
                    </Show>
                </div>

                <div class="flex gap-4 mt-8">
                    <button
                        type="submit"
                        class="px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 disabled:opacity-50"
                        disabled=move || {
                            let checked = form.with(|f| f.values().force_register);
                            !submission.with(|s| s.submit_enabled(checked))
                        }
                    >
                        {move || submission.with(|s| s.submit_label())}
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 border border-gray-300 rounded-lg hover:bg-gray-50"
                        on:click=on_cancel
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
            </Show>

            <Show when=move || show_cancel_dialog.get()>
                <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-40">
                    <div
                        role="dialog"
                        aria-modal="true"
                        aria-labelledby="cancel-schema-request-title"
                        class="bg-white rounded-lg shadow-xl p-6 max-w-md w-full mx-4"
                    >
                        <h3 id="cancel-schema-request-title" class="text-lg font-semibold mb-2">
                            "Cancel schema request?"
                        </h3>
                        <p class="text-gray-600 mb-6">
                            "Do you want to cancel this request? The data added will be lost."
                        </p>
                        <div class="flex justify-end gap-3">
                            <button
                                type="button"
                                class="px-4 py-2 border border-gray-300 rounded-lg hover:bg-gray-50"
                                on:click=move |_| {
                                    set_show_cancel_dialog.set(false);
                                    CancelDialogChoice::ContinueWithRequest.resolve(&navigator);
                                }
                            >
                                "Continue with request"
                            </button>
                            <button
                                type="button"
                                class="px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700"
                                on:click=move |_| {
                                    set_show_cancel_dialog.set(false);
                                    CancelDialogChoice::CancelRequest.resolve(&navigator);
                                }
                            >
                                "Cancel request"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn field_error(errors: FieldErrors, slot: ErrorSlot) -> Option<impl IntoView> {
    errors
        .message_for(slot)
        .map(|message| view! { <p class=ERROR_CLASS>{message}</p> })
}

fn environment_option(environment: Environment, form: RwSignal<SchemaRequestForm>) -> impl IntoView {
    let id = environment.id.clone();
    view! {
        <option
            value=environment.id
            prop:selected=move || form.with(|f| f.values().environment.as_deref() == Some(id.as_str()))
        >
            {environment.name}
        </option>
    }
}
