//! One module per area; one function component per route.
//!
//! Every protected page follows the same shape: a [`ResourceHandle`] per
//! fetched slice, an effect that loads on mount, callbacks that post and then
//! patch local state, and a renderer with loading/error/empty branches.
//!
//! [`ResourceHandle`]: crate::hooks::ResourceHandle

use kodu_core::Session;
use yew::Properties;

pub(crate) mod admin;
pub(crate) mod counsellor;
pub(crate) mod dashboards;
pub(crate) mod fees;
pub(crate) mod public;
pub(crate) mod student;
pub(crate) mod trainer;

/// Props of every protected page.
#[derive(Properties, PartialEq)]
pub(crate) struct PageProps {
    pub(crate) session: Session,
}
