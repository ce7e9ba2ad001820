/// Engine-level switches and defaults, supplied by the hosting application.
#[derive(Clone)]
pub struct EngineConfig {
    /// Trigger a DNSSEC rectify after every record mutation.
    pub dnssec_enabled: bool,
    /// Mirror record comments onto the paired forward/reverse record.
    pub comments_sync_enabled: bool,
    /// TTL substituted when the form field is left blank.
    pub default_ttl: u32,
}

impl EngineConfig {
    pub fn new(dnssec_enabled: bool, comments_sync_enabled: bool, default_ttl: u32) -> Self {
        Self {
            dnssec_enabled,
            comments_sync_enabled,
            default_ttl,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dnssec_enabled: false,
            comments_sync_enabled: true,
            default_ttl: 86400,
        }
    }
}
