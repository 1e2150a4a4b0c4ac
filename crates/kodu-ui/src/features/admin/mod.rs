mod approve_users;
mod view_queries;

pub(crate) use approve_users::ApproveUsers;
pub(crate) use view_queries::ViewQueries;
