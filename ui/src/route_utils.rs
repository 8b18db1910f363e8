//! Route descriptors gated by feature flags or permissions
//!
//! The route table is built once, after feature flags have loaded. Feature
//! flags are therefore evaluated at construction time and never re-read;
//! permission checks happen when a [`PrivateRoute`] mounts.

use std::fmt;
use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::NavigateOptions;

use crate::auth::{AuthContext, Permissions};
use crate::feature_flags::{FeatureFlag, FeatureFlags};
use crate::toast::{use_toaster, Notify, Toast, ToastVariant};

pub type ViewFactory = Arc<dyn Fn() -> AnyView + Send + Sync>;

pub fn view_factory<F, V>(view: F) -> ViewFactory
where
    F: Fn() -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    Arc::new(move || view().into_any())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    TopicSchemaRequest,
    SchemaRequests,
}

impl AppRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRoute::Home => "/",
            AppRoute::TopicSchemaRequest => "/topic/:topic_name/request-schema",
            AppRoute::SchemaRequests => "/requests/schemas",
        }
    }
}

#[derive(Clone)]
pub enum RouteElement {
    View(ViewFactory),
    Redirect(AppRoute),
    Private {
        permission: String,
        element: ViewFactory,
    },
}

impl fmt::Debug for RouteElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteElement::View(_) => f.write_str("View"),
            RouteElement::Redirect(route) => f.debug_tuple("Redirect").field(route).finish(),
            RouteElement::Private { permission, .. } => f
                .debug_struct("Private")
                .field("permission", permission)
                .finish_non_exhaustive(),
        }
    }
}

impl RouteElement {
    pub fn render(&self) -> AnyView {
        match self {
            RouteElement::View(element) => element(),
            RouteElement::Redirect(route) => {
                let path = route.as_str();
                view! { <Redirect path=path/> }.into_any()
            }
            RouteElement::Private { permission, element } => {
                let element = element.clone();
                view! {
                    <PrivateRoute permission=permission.clone()>
                        {element()}
                    </PrivateRoute>
                }
                .into_any()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteObject {
    pub path: AppRoute,
    pub element: RouteElement,
    pub children: Vec<RouteObject>,
}

/// Render `element` only when `feature_flag` is active, otherwise redirect
/// to `redirect_route_without_feature_flag`.
pub fn create_route_behind_feature_flag(
    path: AppRoute,
    element: ViewFactory,
    feature_flag: FeatureFlag,
    redirect_route_without_feature_flag: AppRoute,
    children: Option<Vec<RouteObject>>,
    feature_flags: &FeatureFlags,
) -> RouteObject {
    let element = if feature_flags.is_active(feature_flag) {
        RouteElement::View(element)
    } else {
        log::debug!(
            "{} is disabled, {} redirects to {}",
            feature_flag.as_str(),
            path.as_str(),
            redirect_route_without_feature_flag.as_str()
        );
        RouteElement::Redirect(redirect_route_without_feature_flag)
    };

    RouteObject {
        path,
        element,
        children: children.unwrap_or_default(),
    }
}

/// Wrap `element` in a [`PrivateRoute`] requiring `permission`.
pub fn create_private_route(
    path: AppRoute,
    element: ViewFactory,
    permission: impl Into<String>,
    children: Option<Vec<RouteObject>>,
) -> RouteObject {
    RouteObject {
        path,
        element: RouteElement::Private {
            permission: permission.into(),
            element,
        },
        children: children.unwrap_or_default(),
    }
}

/// Decides access for one mounted [`PrivateRoute`] and reports a denial at
/// most once, however often it is asked.
#[derive(Debug, Clone)]
pub struct AuthorizationGuard {
    permission: String,
    notified: bool,
}

impl AuthorizationGuard {
    pub fn new(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            notified: false,
        }
    }

    pub fn check(&mut self, permissions: &Permissions, notify: &impl Notify) -> bool {
        let authorized = permissions.has(&self.permission);
        if !authorized && !self.notified {
            self.notified = true;
            log::warn!("Not authorized: {}", self.permission);
            notify.toast(Toast::new(
                format!("Not authorized: {}", self.permission),
                ToastVariant::Danger,
            ));
        }
        authorized
    }
}

#[component]
pub fn PrivateRoute(#[prop(into)] permission: String, children: Children) -> impl IntoView {
    let auth = use_context::<AuthContext>().unwrap_or_default();
    let toaster = use_toaster();

    // Component bodies run once per mount; later permission changes do not
    // re-evaluate access.
    let mut guard = AuthorizationGuard::new(permission);
    if guard.check(&auth.permissions, &toaster) {
        children().into_any()
    } else {
        let options = NavigateOptions {
            replace: true,
            ..Default::default()
        };
        view! { <Redirect path=AppRoute::Home.as_str() options=options/> }.into_any()
    }
}
