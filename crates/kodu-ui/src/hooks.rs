//! Fetch-state hook shared by the pages.
//!
//! # Design
//! - The [`Resource`] lives in a `use_mut_ref` cell so completions always see
//!   the latest ticket, then a forced redraw publishes the change.
//! - Completions for unmounted or superseded requests are dropped by the
//!   ticket check.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use gloo::console;
use kodu_core::{FetchFailure, Resource, Session};
use serde::de::DeserializeOwned;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::ApiCtx;
use crate::format::failure_text;

pub(crate) struct ResourceHandle<T> {
    cell: Rc<RefCell<Resource<T>>>,
    redraw: UseForceUpdateHandle,
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
            redraw: self.redraw.clone(),
        }
    }
}

#[hook]
pub(crate) fn use_resource<T: 'static>() -> ResourceHandle<T> {
    let cell = use_mut_ref(Resource::<T>::new);
    let redraw = use_force_update();
    ResourceHandle { cell, redraw }
}

impl<T: Clone + 'static> ResourceHandle<T> {
    /// Run `request`, replacing the data on success. Failures keep the
    /// previous data and record `fallback` unless the backend sent a message.
    pub(crate) fn load<F>(&self, request: F, fallback: &'static str)
    where
        F: Future<Output = Result<T, FetchFailure>> + 'static,
    {
        let ticket = self.cell.borrow_mut().begin();
        self.redraw.force_update();
        let handle = self.clone();
        spawn_local(async move {
            let changed = match request.await {
                Ok(value) => handle.cell.borrow_mut().resolve(ticket, value),
                Err(failure) => {
                    console::warn!("fetch failed", failure.to_string());
                    handle
                        .cell
                        .borrow_mut()
                        .reject(ticket, failure_text(&failure, fallback))
                }
            };
            if changed {
                handle.redraw.force_update();
            }
        });
    }

    /// Copy of the current state for rendering.
    pub(crate) fn snapshot(&self) -> Resource<T> {
        self.cell.borrow().clone()
    }

    /// Edit loaded data in place, e.g. after an action succeeded.
    pub(crate) fn update(&self, change: impl FnOnce(&mut T)) {
        self.cell.borrow_mut().update(change);
        self.redraw.force_update();
    }

    /// Forget loaded data when the selection it depends on changes.
    pub(crate) fn reset(&self) {
        self.cell.borrow_mut().reset();
        self.redraw.force_update();
    }
}

#[hook]
pub(crate) fn use_api() -> ApiCtx {
    use_context::<ApiCtx>().unwrap_or_else(|| ApiCtx::new(crate::config::api_base_url()))
}

/// List at `path`, fetched once on mount.
#[hook]
pub(crate) fn use_listing<T>(
    path: &'static str,
    session: Session,
    fallback: &'static str,
) -> ResourceHandle<Vec<T>>
where
    T: DeserializeOwned + Clone + 'static,
{
    let api = use_api();
    let listing = use_resource::<Vec<T>>();
    {
        let listing = listing.clone();
        use_effect_with_deps(
            move |_| {
                let client = api.client;
                listing.load(
                    async move { client.get_list::<T>(path, Some(&session)).await },
                    fallback,
                );
                || ()
            },
            (),
        );
    }
    listing
}
