pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Sent on every response, whatever the outcome.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
    ("Access-Control-Allow-Methods", ALLOWED_METHODS),
];
