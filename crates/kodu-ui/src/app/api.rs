//! API client context for sharing a singleton client instance.

use crate::services::api::ApiClient;
use std::rc::Rc;

/// Shared API client context for pages.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    pub(crate) client: Rc<ApiClient>,
}

impl ApiCtx {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Rc::new(ApiClient::new(base_url)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
