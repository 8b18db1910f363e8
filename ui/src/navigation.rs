//! Navigation seam between page logic and the router.
//!
//! View closures must be `Send`, so pages do not hold the router's navigate
//! closure. They post a [`Navigation`] through a signal and a local effect
//! performs it.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// One entry back in browser history.
    Back,
    To(String),
}

pub trait Navigator {
    fn navigate(&self, target: Navigation);
}

struct RouterNavigator<F> {
    navigate: F,
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn navigate(&self, target: Navigation) {
        match target {
            Navigation::Back => {
                let result = web_sys::window()
                    .ok_or_else(|| "no window".into())
                    .and_then(|w| w.history())
                    .and_then(|h| h.back());
                if let Err(e) = result {
                    log::error!("Failed to navigate back: {:?}", e);
                }
            }
            Navigation::To(path) => (self.navigate)(&path, NavigateOptions::default()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct NavigationRequests {
    request: WriteSignal<Option<Navigation>>,
}

impl Navigator for NavigationRequests {
    fn navigate(&self, target: Navigation) {
        log::debug!("navigate: {:?}", target);
        self.request.set(Some(target));
    }
}

/// Must be called inside a `<Router>`.
pub fn use_navigator() -> NavigationRequests {
    let router = RouterNavigator {
        navigate: use_navigate(),
    };
    let (request, set_request) = signal(None::<Navigation>);

    Effect::new(move |_| {
        if let Some(target) = request.get() {
            router.navigate(target);
        }
    });

    NavigationRequests {
        request: set_request,
    }
}
