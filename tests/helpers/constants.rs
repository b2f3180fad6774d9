pub const TEST_USER_ID: &str = "u1";
pub const TEST_EMAIL: &str = "a@b.com";
pub const TEST_PASSWORD: &str = "pw";
pub const JWT_SECRET: &[u8] = b"integration-test-secret";
pub const ISSUER: &str = "wishlist";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
