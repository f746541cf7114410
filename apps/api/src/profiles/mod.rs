// Profiles and per-user settings.

pub mod handlers;
pub mod settings;
pub mod store;

use chrono::Utc;
use tracing::info;

use crate::auth::session::Identity;
use crate::models::profile::Profile;
use crate::profiles::settings::UserSettings;
use crate::profiles::store::ProfileStore;

/// Returns the profile for `identity`, creating it from the identity if absent.
pub async fn ensure_profile(
    store: &dyn ProfileStore,
    identity: &Identity,
) -> Result<Profile, sqlx::Error> {
    if let Some(profile) = store.get(&identity.uid).await? {
        return Ok(profile);
    }

    let now = Utc::now();
    let profile = Profile {
        id: identity.uid.clone(),
        email: identity.email.clone(),
        username: None,
        full_name: identity.display_name.clone(),
        avatar_url: identity.photo_url.clone(),
        bio: None,
        created_at: now,
        updated_at: now,
    };
    store.create(&profile).await?;
    info!("Created profile for user {}", identity.uid);
    Ok(profile)
}

/// Returns stored settings, persisting and returning the defaults on first read.
pub async fn settings_or_default(
    store: &dyn ProfileStore,
    user_id: &str,
) -> Result<UserSettings, sqlx::Error> {
    if let Some(settings) = store.get_settings(user_id).await? {
        return Ok(settings);
    }
    let defaults = UserSettings::default();
    store.put_settings(user_id, &defaults).await?;
    Ok(defaults)
}
