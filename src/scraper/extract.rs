//! Pure extraction of profile fields from a profile page
//!
//! The page embeds the account state as JSON inside a script tag. Rather than
//! locating and parsing that blob, each field is pulled with its own pattern so
//! a partial layout change degrades to missing fields instead of a hard error.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::ScrapeError;
use crate::models::ExternalLink;
use crate::models::Profile;

pub const MAX_USERNAME_LEN: usize = 24;

fn count_regex(field: &str) -> Regex {
    Regex::new(&format!(r#""{field}"\s*:\s*(\d+)"#)).expect("Invalid count regex")
}

fn string_regex(field: &str) -> Regex {
    Regex::new(&format!(r#""{field}"\s*:\s*"((?:[^"\\]|\\.)*)""#)).expect("Invalid string regex")
}

static FOLLOWER_COUNT: LazyLock<Regex> = LazyLock::new(|| count_regex("followerCount"));
static FOLLOWING_COUNT: LazyLock<Regex> = LazyLock::new(|| count_regex("followingCount"));
static HEART_COUNT: LazyLock<Regex> = LazyLock::new(|| count_regex("heartCount"));
static HEART: LazyLock<Regex> = LazyLock::new(|| count_regex("heart"));
static VIDEO_COUNT: LazyLock<Regex> = LazyLock::new(|| count_regex("videoCount"));
static NICKNAME: LazyLock<Regex> = LazyLock::new(|| string_regex("nickname"));
static SIGNATURE: LazyLock<Regex> = LazyLock::new(|| string_regex("signature"));
static AVATAR_LARGER: LazyLock<Regex> = LazyLock::new(|| string_regex("avatarLarger"));
static VERIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""verified"\s*:\s*(true|false)"#).expect("Invalid verified regex")
});
static BIO_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""bioLink"\s*:\s*\{[^}]*?"link"\s*:\s*"((?:[^"\\]|\\.)*)""#)
        .expect("Invalid bio link regex")
});

/// Trim, strip a leading `@` and validate a username
pub fn normalize_username(raw: &str) -> Result<String, ScrapeError> {
    let trimmed = raw.trim();
    let username = trimmed.strip_prefix('@').unwrap_or(trimmed);

    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
    if username.is_empty() || username.len() > MAX_USERNAME_LEN || !valid_chars {
        return Err(ScrapeError::InvalidUsername(raw.to_string()));
    }

    Ok(username.to_string())
}

fn capture_count(regex: &Regex, html: &str) -> Option<u64> {
    regex
        .captures(html)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn capture_string(regex: &Regex, html: &str) -> Option<String> {
    regex
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| decode_json_string(m.as_str()))
}

/// Decode JSON string escapes (`\/`, `\"`, `é`, ...)
fn decode_json_string(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.replace("\\/", "/"))
}

/// Platform name derived from a link's host
pub fn link_platform(link: &str) -> String {
    let with_scheme = if link.contains("://") {
        link.to_string()
    } else {
        format!("https://{link}")
    };

    let Some(host) = url::Url::parse(&with_scheme)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    else {
        return "website".to_string();
    };
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let platform = match host {
        "instagram.com" => "instagram",
        "youtube.com" | "youtu.be" | "m.youtube.com" => "youtube",
        "twitter.com" | "x.com" => "twitter",
        "linktr.ee" => "linktree",
        "facebook.com" | "fb.com" => "facebook",
        "twitch.tv" => "twitch",
        "spotify.com" | "open.spotify.com" => "spotify",
        other => return other.to_string(),
    };
    platform.to_string()
}

/// Build a `Profile` from profile page HTML
///
/// Fails with `StructureChanged` only when none of the follower, like and
/// video counters can be found. Missing individual counters become 0.
pub fn extract_profile(username: &str, html: &str) -> Result<Profile, ScrapeError> {
    let followers = capture_count(&FOLLOWER_COUNT, html);
    let likes = capture_count(&HEART_COUNT, html).or_else(|| capture_count(&HEART, html));
    let videos = capture_count(&VIDEO_COUNT, html);

    if followers.is_none() && likes.is_none() && videos.is_none() {
        return Err(ScrapeError::StructureChanged(username.to_string()));
    }

    let nickname = capture_string(&NICKNAME, html)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| username.to_string());

    let external_links = capture_string(&BIO_LINK, html)
        .filter(|link| !link.trim().is_empty())
        .map(|url| {
            vec![ExternalLink {
                platform: link_platform(&url),
                url,
            }]
        });

    Ok(Profile {
        username: username.to_string(),
        nickname,
        bio: capture_string(&SIGNATURE, html).filter(|s| !s.trim().is_empty()),
        avatar_url: capture_string(&AVATAR_LARGER, html),
        is_verified: VERIFIED
            .captures(html)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str() == "true"),
        followers: followers.unwrap_or(0),
        following: capture_count(&FOLLOWING_COUNT, html),
        likes: likes.unwrap_or(0),
        videos: videos.unwrap_or(0),
        external_links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><script id="__UNIVERSAL_DATA_FOR_REHYDRATION__">
        {"userInfo":{"user":{"id":"1","uniqueId":"dancer","nickname":"Dancer & Co",
        "avatarLarger":"https:\/\/cdn.example.com\/a.jpeg","signature":"Moves daily\nDM for collabs",
        "verified":true,"bioLink":{"link":"instagram.com\/dancer","risk":0}},
        "stats":{"followerCount":12345,"followingCount":67,"heart":999,"heartCount":890123,"videoCount":42}}}
        </script></html>"#;

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  @dancer ").unwrap(), "dancer");
        assert_eq!(normalize_username("a.b_c").unwrap(), "a.b_c");
        assert!(normalize_username("").is_err());
        assert!(normalize_username("@").is_err());
        assert!(normalize_username("has space").is_err());
        assert!(normalize_username("dash-name").is_err());
        assert!(normalize_username(&"x".repeat(25)).is_err());
        assert!(normalize_username(&"x".repeat(24)).is_ok());
    }

    #[test]
    fn test_extract_full_profile() {
        let profile = extract_profile("dancer", PAGE).unwrap();
        assert_eq!(profile.followers, 12_345);
        assert_eq!(profile.following, Some(67));
        assert_eq!(profile.likes, 890_123);
        assert_eq!(profile.videos, 42);
        assert_eq!(profile.nickname, "Dancer & Co");
        assert_eq!(profile.bio.as_deref(), Some("Moves daily\nDM for collabs"));
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://cdn.example.com/a.jpeg")
        );
        assert_eq!(profile.is_verified, Some(true));

        let links = profile.external_links.unwrap();
        assert_eq!(links[0].url, "instagram.com/dancer");
        assert_eq!(links[0].platform, "instagram");
    }

    #[test]
    fn test_heart_fallback_and_missing_counters() {
        let html = r#"{"stats":{"heart":77}}"#;
        let profile = extract_profile("someone", html).unwrap();
        assert_eq!(profile.likes, 77);
        assert_eq!(profile.followers, 0);
        assert_eq!(profile.videos, 0);
        assert_eq!(profile.following, None);
        assert_eq!(profile.nickname, "someone");
        assert!(profile.external_links.is_none());
    }

    #[test]
    fn test_structure_changed() {
        let err = extract_profile("ghost", "<html>captcha</html>").unwrap_err();
        assert_eq!(err, ScrapeError::StructureChanged("ghost".to_string()));
    }

    #[test]
    fn test_link_platform() {
        assert_eq!(link_platform("https://www.youtube.com/@me"), "youtube");
        assert_eq!(link_platform("x.com/me"), "twitter");
        assert_eq!(link_platform("https://shop.example.org/p"), "shop.example.org");
    }
}
