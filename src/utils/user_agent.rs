//! Device class and bot detection from `User-Agent`.

use woothee::parser::Parser;

use crate::domain::redirect::DeviceType;

/// Device and crawler classification of a user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserAgentInfo {
    pub device: Option<DeviceType>,
    pub is_bot: bool,
}

/// Classifies a `User-Agent` header value.
///
/// woothee has no tablet category, so iPads and Android devices that do not
/// advertise `Mobile` are reported as tablets before its category is read.
/// Unrecognised agents get no device.
pub fn parse_user_agent(user_agent: &str) -> UserAgentInfo {
    let user_agent = user_agent.trim();
    if user_agent.is_empty() {
        return UserAgentInfo::default();
    }

    let Some(result) = Parser::new().parse(user_agent) else {
        return UserAgentInfo::default();
    };

    let is_bot = result.category == "crawler";
    let is_tablet = user_agent.contains("iPad")
        || (user_agent.contains("Android") && !user_agent.contains("Mobile"));

    let device = if is_bot {
        None
    } else if is_tablet {
        Some(DeviceType::Tablet)
    } else {
        match result.category {
            "smartphone" | "mobilephone" => Some(DeviceType::Mobile),
            "pc" => Some(DeviceType::Desktop),
            _ => None,
        }
    };

    UserAgentInfo { device, is_bot }
}
