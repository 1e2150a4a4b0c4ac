mod landing;
mod login;
mod register;

pub(crate) use landing::Landing;
pub(crate) use login::Login;
pub(crate) use register::Register;
