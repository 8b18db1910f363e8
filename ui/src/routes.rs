//! Console route table

use leptos::prelude::*;

use crate::components::dashboard::Dashboard;
use crate::components::schema_requests::SchemaRequests;
use crate::feature_flags::{FeatureFlag, FeatureFlags};
use crate::route_utils::{
    create_private_route, create_route_behind_feature_flag, view_factory, AppRoute, RouteElement,
    RouteObject,
};
use crate::schema_request::TopicSchemaRequestPage;

/// Permission required to request topics, schemas and ACLs.
pub const REQUEST_ITEMS_PERMISSION: &str = "requestItems";

pub fn console_routes(feature_flags: &FeatureFlags) -> Vec<RouteObject> {
    vec![
        RouteObject {
            path: AppRoute::Home,
            element: RouteElement::View(view_factory(Dashboard)),
            children: Vec::new(),
        },
        create_private_route(
            AppRoute::TopicSchemaRequest,
            view_factory(TopicSchemaRequestPage),
            REQUEST_ITEMS_PERMISSION,
            None,
        ),
        create_route_behind_feature_flag(
            AppRoute::SchemaRequests,
            view_factory(SchemaRequests),
            FeatureFlag::MyRequests,
            AppRoute::Home,
            None,
            feature_flags,
        ),
    ]
}

pub struct RouteTable {
    routes: Vec<RouteObject>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteObject>) -> Self {
        Self { routes }
    }

    pub fn find(&self, path: AppRoute) -> Option<&RouteObject> {
        fn search(routes: &[RouteObject], path: AppRoute) -> Option<&RouteObject> {
            routes.iter().find_map(|route| {
                if route.path == path {
                    Some(route)
                } else {
                    search(&route.children, path)
                }
            })
        }
        search(&self.routes, path)
    }

    pub fn render(&self, path: AppRoute) -> AnyView {
        match self.find(path) {
            Some(route) => route.element.render(),
            None => {
                log::error!("No route registered for {}", path.as_str());
                "Not found.".into_any()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_my_requests_redirects_home_without_flag() {
        let table = RouteTable::new(console_routes(&FeatureFlags::default()));

        let route = table.find(AppRoute::SchemaRequests).unwrap();
        assert!(matches!(route.element, RouteElement::Redirect(AppRoute::Home)));
    }

    #[test]
    fn test_my_requests_rendered_with_flag() {
        let flags: FeatureFlags = [FeatureFlag::MyRequests].into_iter().collect();
        let table = RouteTable::new(console_routes(&flags));

        let route = table.find(AppRoute::SchemaRequests).unwrap();
        assert!(matches!(route.element, RouteElement::View(_)));
    }

    #[test]
    fn test_schema_request_requires_request_items() {
        let table = RouteTable::new(console_routes(&FeatureFlags::default()));

        match &table.find(AppRoute::TopicSchemaRequest).unwrap().element {
            RouteElement::Private { permission, .. } => {
                assert_eq!(permission, REQUEST_ITEMS_PERMISSION)
            }
            other => panic!("Expected private route, got {:?}", other),
        }
    }

    #[test]
    fn test_find_searches_children() {
        let child = create_private_route(
            AppRoute::TopicSchemaRequest,
            view_factory(|| "child"),
            REQUEST_ITEMS_PERMISSION,
            None,
        );
        let parent = create_private_route(
            AppRoute::Home,
            view_factory(|| "parent"),
            REQUEST_ITEMS_PERMISSION,
            Some(vec![child]),
        );
        let table = RouteTable::new(vec![parent]);

        assert!(table.find(AppRoute::TopicSchemaRequest).is_some());
        assert!(table.find(AppRoute::SchemaRequests).is_none());
    }
}
