//! REST endpoint paths, relative to the configured base URL.

pub struct Endpoints;

impl Endpoints {
    pub const LOGIN: &'static str = "/api/auth/login";
    pub const SIGNUP: &'static str = "/api/auth/signup";
    pub const TURFS: &'static str = "/api/turfs";
    pub const PLAYERS: &'static str = "/api/players";
    pub const BOOKINGS: &'static str = "/api/bookings";

    pub fn turf(id: &str) -> String {
        item(Self::TURFS, id)
    }

    pub fn player(id: &str) -> String {
        item(Self::PLAYERS, id)
    }
}

/// `id` is a single path segment; reserved characters are percent-encoded.
fn item(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}
