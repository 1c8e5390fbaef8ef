use crate::error::AppError;

pub fn validate_login_request(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation_field("email", "Email is required"));
    }

    if !email.contains('@') {
        return Err(AppError::validation_field("email", "Invalid email format"));
    }

    if password.trim().is_empty() {
        return Err(AppError::validation_field("password", "Password is required"));
    }

    Ok(())
}

pub fn validate_skills(skills: &[String]) -> Result<(), AppError> {
    for skill in skills {
        if super::rules::validate_skill_name(skill).is_err() {
            return Err(AppError::validation_field(
                "skills",
                format!("Invalid skill: '{}'", skill),
            ));
        }
    }
    Ok(())
}

/// Trims, drops blanks and removes case-insensitive duplicates, keeping first spelling.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}
