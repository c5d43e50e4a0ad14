// Keys of the persisted token store. All values are strings.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const REFRESH_EXP_KEY: &str = "refresh_exp";
pub const NAME_KEY: &str = "name";
pub const AVATAR_KEY: &str = "avatar";
pub const USER_ID_KEY: &str = "user_id";
pub const ROLE_KEY: &str = "role";
pub const GROUPS_KEY: &str = "groups";
pub const REDIRECTED_FROM_KEY: &str = "redirectedFrom";

// Backend endpoints, relative to the API base URL.
pub const LOGIN_ENDPOINT: &str = "login";
pub const SOCIAL_LOGIN_ENDPOINT: &str = "login/social";
pub const REFRESH_ENDPOINT: &str = "login/refresh";
pub const LOGOUT_ENDPOINT: &str = "logout";
pub const ME_ENDPOINT: &str = "me";

/// Error code the backend sends with a 401 when the presented token is expired or invalid.
pub const TOKEN_NOT_VALID_CODE: &str = "token_not_valid";

pub const DEFAULT_API_PREFIX: &str = "/api/v1/";
pub const DEFAULT_LOGIN_PAGE_PATH: &str = "/login";
pub const DEFAULT_TOKEN_STORE_PATH: &str = ".studio-session.json";

pub mod env {
    pub const API_ORIGIN_ENV_VAR: &str = "API_ORIGIN";
    pub const API_PREFIX_ENV_VAR: &str = "API_PREFIX";
    pub const TOKEN_STORE_PATH_ENV_VAR: &str = "TOKEN_STORE_PATH";
    pub const LOGIN_PAGE_PATH_ENV_VAR: &str = "LOGIN_PAGE_PATH";
    pub const LOGIN_ENDPOINT_ENV_VAR: &str = "LOGIN_ENDPOINT";
    pub const SOCIAL_LOGIN_ENDPOINT_ENV_VAR: &str = "SOCIAL_LOGIN_ENDPOINT";
    pub const REFRESH_ENDPOINT_ENV_VAR: &str = "REFRESH_ENDPOINT";
    pub const LOGOUT_ENDPOINT_ENV_VAR: &str = "LOGOUT_ENDPOINT";
    pub const ME_ENDPOINT_ENV_VAR: &str = "ME_ENDPOINT";
    pub const GROUP_NAMES_JSON_ENV_VAR: &str = "GROUP_NAMES_JSON";
}
