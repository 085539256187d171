mod auth;
mod dataset;
mod pacer;

pub use auth::EXPIRY_MARGIN_SECS;
pub use auth::TokenManager;
pub use auth::is_expired;
pub use dataset::DatasetWriter;
pub use dataset::FIELD_DELIMITER;
pub use dataset::split_line;
pub use pacer::Clock;
pub use pacer::Pacer;
pub use pacer::SystemClock;
