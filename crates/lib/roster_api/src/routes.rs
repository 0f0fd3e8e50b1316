//! Route paths served by [`crate::router`].

pub const GET_API_HEALTH: &str = "/api/health";
pub const GET_API_USERS: &str = "/api/users";
pub const POST_AUTH_REGISTER: &str = "/api/auth/register";
pub const POST_AUTH_LOGIN: &str = "/api/auth/login";
pub const POST_AUTH_REFRESH: &str = "/api/auth/refresh";
pub const POST_AUTH_LOGOUT: &str = "/api/auth/logout";
pub const POST_AUTH_LOGOUT_REFRESH: &str = "/api/auth/logout/refresh";
