use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub share_data: bool,
    pub show_profile: bool,
    pub show_activity: bool,
    pub allow_analytics: bool,
    pub allow_cookies: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub in_app_notifications: bool,
    pub weekly_digest: bool,
    pub new_features: bool,
    pub security_alerts: bool,
    pub marketing_emails: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: String,
}

/// Per-user settings, stored as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub privacy: PrivacySettings,
    pub notifications: NotificationSettings,
    pub preferences: Preferences,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            privacy: PrivacySettings {
                share_data: false,
                show_profile: true,
                show_activity: true,
                allow_analytics: true,
                allow_cookies: true,
            },
            notifications: NotificationSettings {
                email_notifications: true,
                in_app_notifications: true,
                weekly_digest: true,
                new_features: true,
                security_alerts: true,
                marketing_emails: false,
            },
            preferences: Preferences {
                language: "en".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_opt_out_of_sharing_and_marketing() {
        let s = UserSettings::default();
        assert!(!s.privacy.share_data);
        assert!(!s.notifications.marketing_emails);
        assert!(s.notifications.security_alerts);
        assert_eq!(s.preferences.language, "en");
    }

    #[test]
    fn test_settings_json_shape() {
        let value = serde_json::to_value(UserSettings::default()).unwrap();
        assert_eq!(value["notifications"]["weekly_digest"], true);
        assert_eq!(value["privacy"]["show_profile"], true);
    }
}
