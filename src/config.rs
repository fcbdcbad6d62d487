use serde::Deserialize;

/// What to do when a submission names an RSVP id the store doesn't have.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Reject with not found.
    #[default]
    Strict,
    /// Create a new row under the submitted id.
    Upsert,
}

/// Application settings, read from the Rocket figment (`Rocket.toml`,
/// `ROCKET_*` environment variables).
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub party_id: String,
    #[serde(default)]
    pub update_policy: UpdatePolicy,
}
