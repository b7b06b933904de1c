//! Route paths.

pub const GET_PING: &str = "/ping";

pub const POST_USERS_REGISTER: &str = "/api/v1/users/register";
pub const POST_USERS_AUTH: &str = "/api/v1/users/auth";
pub const USERS_ME: &str = "/api/v1/users/me";

pub const POSTS: &str = "/api/v1/posts";
pub const POSTS_ID: &str = "/api/v1/posts/{id}";
