pub const ACCESS_TOKEN_DURATION_SECONDS: i64 = 900;
pub const REFRESH_TOKEN_DURATION_SECONDS: i64 = 604_800;
