//! Base URL selection.

use tracing::debug;

/// Web-mode default when no override is configured
pub const DEFAULT_WEB_API_URL: &str = "http://localhost:5000/api";

/// Device candidates, most specific first.
///
/// `10.0.2.2` is the Android emulator's alias for the host loopback; the LAN
/// address is where a physical device usually finds a development backend.
pub const MOBILE_API_CANDIDATES: [&str; 3] = [
    "http://10.0.2.2:5000/api",
    "http://192.168.1.100:5000/api",
    "http://localhost:5000/api",
];

/// Picks the API base URL once per client.
#[derive(Debug, Clone, Default)]
pub struct EndpointResolver {
    web_override: Option<String>,
}

impl EndpointResolver {
    /// `web_override` replaces the localhost default in web mode only.
    pub fn new(web_override: Option<String>) -> Self {
        Self { web_override }
    }

    pub fn candidates(&self) -> &'static [&'static str] {
        &MOBILE_API_CANDIDATES
    }

    /// Resolve the base URL for the detected platform.
    ///
    /// Mobile always gets the first candidate; the others are not probed.
    pub fn resolve(&self, is_mobile: bool) -> String {
        let url = if is_mobile {
            MOBILE_API_CANDIDATES[0].to_string()
        } else {
            self.web_override
                .clone()
                .unwrap_or_else(|| DEFAULT_WEB_API_URL.to_string())
        };

        debug!(is_mobile, api_base_url = %url, "Resolved API endpoint");
        url
    }
}
