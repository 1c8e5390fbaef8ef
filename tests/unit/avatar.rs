use resource_planner::config::AvatarConfig;
use resource_planner::utils::AvatarUrlHelper;

fn helper() -> AvatarUrlHelper {
    AvatarUrlHelper::new(&AvatarConfig {
        base_url: "https://ui-avatars.com/api/".to_string(),
    })
    .unwrap()
}

#[test]
fn placeholder_pictures_fall_back_to_initials() {
    let avatars = helper();
    let expected = "https://ui-avatars.com/api/?name=Ada+Lovelace&background=4A90E2&color=fff";

    for stored in [None, Some(""), Some("null"), Some("undefined")] {
        assert_eq!(avatars.resolve(stored, "Ada Lovelace"), expected);
    }
    assert_eq!(
        avatars.resolve(Some("/media/ada.png"), "Ada Lovelace"),
        "/media/ada.png"
    );
}

#[test]
fn invalid_base_url_is_a_config_error() {
    let err = AvatarUrlHelper::new(&AvatarConfig {
        base_url: "not a url".to_string(),
    })
    .unwrap_err();
    assert!(matches!(err, resource_planner::error::AppError::Config(_)));
}
