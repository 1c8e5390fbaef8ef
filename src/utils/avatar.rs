use std::borrow::Cow;

use url::Url;

use crate::config::AvatarConfig;
use crate::error::AppError;

const BACKGROUND: &str = "4A90E2";
const FOREGROUND: &str = "fff";

/// Resolves the image shown next to a worker's name.
#[derive(Clone, Debug)]
pub struct AvatarUrlHelper {
    base_url: Url,
}

impl AvatarUrlHelper {
    pub fn new(config: &AvatarConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Config(format!("Invalid avatar service URL: {}", e)))?;
        Ok(Self { base_url })
    }

    /// Initials avatar generated from the display name.
    pub fn fallback_url(&self, name: &str) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("name", name.trim())
            .append_pair("background", BACKGROUND)
            .append_pair("color", FOREGROUND);
        url.into()
    }

    /// The stored picture when there is a usable one, the initials avatar otherwise.
    pub fn resolve<'a>(&self, profile_pic: Option<&'a str>, name: &str) -> Cow<'a, str> {
        match profile_pic.map(str::trim) {
            Some(pic) if is_usable(pic) => Cow::Borrowed(pic),
            _ => Cow::Owned(self.fallback_url(name)),
        }
    }
}

fn is_usable(pic: &str) -> bool {
    !pic.is_empty() && pic != "null" && pic != "undefined"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> AvatarUrlHelper {
        AvatarUrlHelper::new(&AvatarConfig {
            base_url: "https://ui-avatars.com/api/".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn stored_picture_is_used_as_is() {
        let helper = helper();
        assert_eq!(
            helper.resolve(Some("https://cdn.example.com/a.png"), "Ada"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn placeholder_values_fall_back_to_initials() {
        let helper = helper();
        let expected = "https://ui-avatars.com/api/?name=Ada+Lovelace&background=4A90E2&color=fff";
        for pic in [None, Some(""), Some("null"), Some("undefined"), Some("  ")] {
            assert_eq!(helper.resolve(pic, "Ada Lovelace"), expected);
        }
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = AvatarUrlHelper::new(&AvatarConfig {
            base_url: "not a url".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
