pub const DB_NAME: &str = "games";
pub const USERS_COLL: &str = "users";
pub const SCORES_COLL: &str = "scores";

/// Identity scores fall back to when no username is supplied.
pub const GUEST_USERNAME: &str = "guest";

/// Leaderboards are a fixed-size view; the store keeps every entry.
pub const TOP_N: i64 = 5;

pub const USERNAME_MIN: usize = 2;
pub const USERNAME_MAX: usize = 4;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 20;
