//! Device information and the client metadata blob.
//!
//! Two distinct shapes: [`DeviceInformation`] travels *inside* the encrypted
//! payload, while [`ClientMetaInfo`] is the plaintext blob sent alongside
//! the token so the gateway can attribute the request without decrypting.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Screen and viewport measurements as reported by the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserData {
    /// Scripting was available to collect these values.
    pub java_script_enabled: bool,

    /// Bits per pixel of the device's screen.
    pub color_depth: u32,

    /// Screen height in pixels.
    pub screen_height: u32,

    /// Screen width in pixels.
    pub screen_width: u32,

    /// Viewport height in pixels.
    pub inner_height: u32,

    /// Viewport width in pixels.
    pub inner_width: u32,
}

impl Default for BrowserData {
    fn default() -> Self {
        Self {
            java_script_enabled: true,
            color_depth: 24,
            screen_height: 0,
            screen_width: 0,
            inner_height: 0,
            inner_width: 0,
        }
    }
}

/// Device metadata sealed into the encrypted payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInformation {
    /// Minutes the device's clock is offset from UTC.
    pub timezone_offset_utc_minutes: i32,

    /// BCP 47 locale tag of the device.
    pub locale: String,

    /// Screen and viewport measurements.
    pub browser_data: BrowserData,
}

impl Default for DeviceInformation {
    fn default() -> Self {
        Self {
            timezone_offset_utc_minutes: 0,
            locale: "en".to_string(),
            browser_data: BrowserData::default(),
        }
    }
}

/// Plaintext client attribution sent next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetaInfo {
    /// Operating system / platform of the device.
    pub platform_identifier: String,

    /// Toolkit identifier, `name/version`.
    pub sdk_identifier: String,

    /// Who built the toolkit build in use.
    pub sdk_creator: String,

    /// Screen size as `widthxheight`.
    pub screen_size: String,

    /// Bits per pixel of the device's screen.
    pub color_depth: u32,
}

impl ClientMetaInfo {
    /// Builds the blob from collected device information.
    pub fn from_device(platform_identifier: impl Into<String>, device: &DeviceInformation) -> Self {
        Self {
            platform_identifier: platform_identifier.into(),
            sdk_identifier: concat!("payseal/", env!("CARGO_PKG_VERSION")).to_string(),
            sdk_creator: "Payseal".to_string(),
            screen_size: format!(
                "{}x{}",
                device.browser_data.screen_width, device.browser_data.screen_height
            ),
            color_depth: device.browser_data.color_depth,
        }
    }

    /// Encodes the blob as base64url JSON for transport in a header.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).expect("metadata serializes");
        URL_SAFE_NO_PAD.encode(json)
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;

    use super::*;

    #[test]
    fn device_information_serializes_camel_case() {
        let device = DeviceInformation::default();
        let json = serde_json::to_value(&device).unwrap();
        assert!(json.get("timezoneOffsetUtcMinutes").is_some());
        assert!(json["browserData"].get("javaScriptEnabled").is_some());
    }

    #[test]
    fn meta_info_encodes_to_base64url_json() {
        let device = DeviceInformation {
            browser_data: BrowserData {
                screen_width: 1920,
                screen_height: 1080,
                ..BrowserData::default()
            },
            ..DeviceInformation::default()
        };
        let blob = ClientMetaInfo::from_device("linux", &device).encode();

        let decoded = URL_SAFE_NO_PAD.decode(blob).expect("blob is base64url");
        let json: serde_json::Value = serde_json::from_slice(&decoded).expect("blob is JSON");
        assert_eq!(json["platformIdentifier"], "linux");
        assert_eq!(json["screenSize"], "1920x1080");
        assert!(json["sdkIdentifier"]
            .as_str()
            .unwrap()
            .starts_with("payseal/"));
    }
}
