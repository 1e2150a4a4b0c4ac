pub(crate) mod inputs;
pub(crate) mod menu;
pub(crate) mod shell;
pub(crate) mod status;
