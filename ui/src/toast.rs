//! Toast notifications
//!
//! A [`Toaster`] is provided at the application root; pages push toasts
//! through the [`Notify`] trait so decision code can be exercised with a
//! recording implementation.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

const TOAST_DURATION_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    BottomLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub position: ToastPosition,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            message: message.into(),
            position: ToastPosition::BottomLeft,
            variant,
        }
    }
}

pub trait Notify {
    fn toast(&self, toast: Toast);
}

#[derive(Debug, Clone, Default)]
struct ToastQueue {
    next_id: u64,
    items: Vec<(u64, Toast)>,
}

#[derive(Clone, Copy)]
pub struct Toaster {
    queue: RwSignal<ToastQueue>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    fn dismiss(&self, id: u64) {
        // The root owner may already be gone when a timer fires.
        self.queue.try_update(|q| q.items.retain(|(item, _)| *item != id));
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Notify for Toaster {
    fn toast(&self, toast: Toast) {
        log::debug!("toast: {}", toast.message);
        let id = self.queue.try_update(|q| {
            let id = q.next_id;
            q.next_id += 1;
            q.items.push((id, toast));
            id
        });

        if let Some(id) = id {
            let toaster = *self;
            wasm_bindgen_futures::spawn_local(async move {
                TimeoutFuture::new(TOAST_DURATION_MS).await;
                toaster.dismiss(id);
            });
        }
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().unwrap_or_else(|| {
        log::warn!("No Toaster in context; notifications will not be shown");
        Toaster::new()
    })
}

#[component]
pub fn ToastRegion() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="fixed bottom-4 left-4 z-50 space-y-2" aria-live="polite">
            <For
                each=move || toaster.queue.with(|q| {
                    q.items
                        .iter()
                        .filter(|(_, toast)| toast.position == ToastPosition::BottomLeft)
                        .cloned()
                        .collect::<Vec<_>>()
                })
                key=|(id, _)| *id
                children=move |(id, toast)| {
                    let class = match toast.variant {
                        ToastVariant::Default => "bg-gray-800 text-white",
                        ToastVariant::Danger => "bg-red-600 text-white",
                    };
                    view! {
                        <div
                            role="status"
                            class=format!("flex items-center gap-4 px-4 py-3 rounded-lg shadow-lg {}", class)
                        >
                            <span>{toast.message}</span>
                            <button
                                type="button"
                                class="text-sm opacity-75 hover:opacity-100"
                                aria-label="Dismiss notification"
                                on:click=move |_| toaster.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
