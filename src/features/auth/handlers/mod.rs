pub mod auth_handler;

pub use auth_handler::{
    __path_admin_probe, __path_forgot_password, __path_get_me, __path_login, __path_register,
    __path_update_profile, admin_probe, forgot_password, get_me, login, register, update_profile,
};
