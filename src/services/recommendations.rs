use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{
    config::SkillServiceConfig,
    db::enums::AssignmentType,
    db::models::{Candidate, CandidateList, User, WorkerDetails},
    error::AppError,
    services::ledger::WEEKLY_CAPACITY,
    utils::AvatarUrlHelper,
};

/// One worker the recommendation service proposes for a project.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RecommendedWorker {
    pub user_id: Uuid,
    #[serde(default)]
    pub employee_id: Option<String>,
    pub assignment_type: AssignmentType,
    pub assigned_hours: i32,
    pub allocation_percent: f64,
}

#[derive(Deserialize)]
struct RecommendationGroup {
    #[serde(default)]
    recommended_employees: Vec<RecommendedWorker>,
}

#[derive(Deserialize)]
struct RecommendationResponse {
    #[serde(default)]
    recommendations: Vec<RecommendationGroup>,
}

#[derive(Deserialize)]
struct ExtractSkillsResponse {
    #[serde(default)]
    skills: Vec<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct UploadedCv {
    pub filename: String,
    pub path: String,
}

#[derive(Deserialize)]
struct UploadCvResponse {
    success: bool,
    #[serde(default)]
    files: Vec<UploadedCv>,
}

#[derive(Deserialize)]
struct DeleteCvResponse {
    success: bool,
    detail: Option<String>,
}

/// A file received from the dashboard and forwarded to the skill service.
#[derive(Clone, Debug)]
pub struct CvFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait RecommendationApi: Send + Sync {
    async fn recommendations(&self, project_id: Uuid) -> Result<Vec<RecommendedWorker>, AppError>;

    async fn extract_skills(&self, files: Vec<CvFile>) -> Result<Vec<String>, AppError>;

    async fn upload_cv(&self, employee_id: &str, files: Vec<CvFile>) -> Result<Vec<UploadedCv>, AppError>;

    async fn delete_cv(&self, employee_id: &str, file_name: &str) -> Result<(), AppError>;
}

/// HTTP client for the skill-extraction and recommendation service.
#[derive(Clone, Debug)]
pub struct SkillServiceClient {
    client: reqwest::Client,
    base_url: Url,
}

impl SkillServiceClient {
    pub fn new(config: &SkillServiceConfig) -> Result<Self, AppError> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| AppError::Config(format!("Invalid skill service URL: {}", e)))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::internal(format!("Invalid skill service path {}: {}", path, e)))
    }

    fn files_form(mut form: Form, files: Vec<CvFile>) -> Result<Form, AppError> {
        for file in files {
            let mut part = Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = file.content_type {
                part = part
                    .mime_str(&mime)
                    .map_err(|e| AppError::validation_field("files", format!("Invalid content type: {}", e)))?;
            }
            form = form.part("files", part);
        }
        Ok(form)
    }
}

fn remote_err(context: &str) -> impl Fn(reqwest::Error) -> AppError + '_ {
    move |e| {
        if e.is_timeout() {
            AppError::remote(format!("{} timed out", context))
        } else {
            AppError::remote(format!("{}: {}", context, e))
        }
    }
}

#[async_trait]
impl RecommendationApi for SkillServiceClient {
    async fn recommendations(&self, project_id: Uuid) -> Result<Vec<RecommendedWorker>, AppError> {
        let url = self.endpoint(&format!("recommendations/{}", project_id))?;
        let response: RecommendationResponse = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(remote_err("recommendations"))?
            .error_for_status()
            .map_err(remote_err("recommendations"))?
            .json()
            .await
            .map_err(remote_err("recommendations"))?;

        Ok(response
            .recommendations
            .into_iter()
            .flat_map(|group| group.recommended_employees)
            .collect())
    }

    async fn extract_skills(&self, files: Vec<CvFile>) -> Result<Vec<String>, AppError> {
        let url = self.endpoint("extract_skills/")?;
        let form = Self::files_form(Form::new(), files)?;
        let response: ExtractSkillsResponse = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(remote_err("extract_skills"))?
            .error_for_status()
            .map_err(remote_err("extract_skills"))?
            .json()
            .await
            .map_err(remote_err("extract_skills"))?;
        Ok(response.skills)
    }

    async fn upload_cv(&self, employee_id: &str, files: Vec<CvFile>) -> Result<Vec<UploadedCv>, AppError> {
        let url = self.endpoint("upload_cv/")?;
        let form = Self::files_form(Form::new().text("employee_id", employee_id.to_string()), files)?;
        let response: UploadCvResponse = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(remote_err("upload_cv"))?
            .error_for_status()
            .map_err(remote_err("upload_cv"))?
            .json()
            .await
            .map_err(remote_err("upload_cv"))?;
        if !response.success {
            return Err(AppError::remote("upload_cv: service reported failure"));
        }
        Ok(response.files)
    }

    async fn delete_cv(&self, employee_id: &str, file_name: &str) -> Result<(), AppError> {
        let mut url = self.endpoint("delete_cv/")?;
        url.query_pairs_mut()
            .append_pair("employee_id", employee_id)
            .append_pair("filename", file_name);
        let response: DeleteCvResponse = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(remote_err("delete_cv"))?
            .json()
            .await
            .map_err(remote_err("delete_cv"))?;
        if !response.success {
            return Err(AppError::remote(format!(
                "delete_cv: {}",
                response.detail.unwrap_or_else(|| "service reported failure".to_string())
            )));
        }
        Ok(())
    }
}

/// Hours and allocation percent proposed when the service offers nothing.
pub fn suggested_hours(preferred: Option<AssignmentType>, available: i32) -> (i32, f64) {
    let available = available.max(0);
    let hours = match preferred {
        Some(AssignmentType::PartTime) => match available {
            a if a >= 20 => 20,
            a if a >= 15 => 15,
            a if a >= 5 => 5,
            a => a,
        },
        _ => available.min(WEEKLY_CAPACITY),
    };
    (hours, percent_of_week(hours))
}

fn percent_of_week(hours: i32) -> f64 {
    ((hours as f64 / WEEKLY_CAPACITY as f64) * 100.0 * 100.0).round() / 100.0
}

/// Orders workers for staffing: service picks first in service order, then everyone else.
pub fn rank_candidates(
    workers: Vec<(User, WorkerDetails)>,
    recommended: Option<&[RecommendedWorker]>,
    preferred: Option<AssignmentType>,
    avatars: &AvatarUrlHelper,
) -> CandidateList {
    let picks: HashMap<Uuid, (usize, &RecommendedWorker)> = recommended
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, r)| (r.user_id, (i, r)))
        .collect();

    let mut candidates: Vec<(Option<usize>, Candidate)> = workers
        .into_iter()
        .map(|(user, details)| {
            let pick = picks.get(&user.id).copied();
            let (assignment_type, assigned_hours, allocation_percent) = match pick {
                Some((_, r)) => (r.assignment_type, r.assigned_hours, r.allocation_percent),
                None => {
                    let (hours, percent) = suggested_hours(preferred, details.total_available_hours);
                    (AssignmentType::for_hours(hours), hours, percent)
                }
            };
            let avatar_url = avatars
                .resolve(details.profile_pic.as_deref(), &user.name)
                .into_owned();
            let candidate = Candidate {
                user_id: user.id,
                name: user.name,
                job_title: details.job_title,
                skills: details.skills,
                status: details.status,
                total_available_hours: details.total_available_hours,
                assignment_type,
                assigned_hours,
                allocation_percent,
                recommended: pick.is_some(),
                avatar_url,
            };
            (pick.map(|(i, _)| i), candidate)
        })
        .collect();

    // stable: unrecommended workers keep their incoming order
    candidates.sort_by_key(|(rank, _)| rank.unwrap_or(usize::MAX));

    CandidateList {
        ranked: recommended.is_some(),
        candidates: candidates.into_iter().map(|(_, c)| c).collect(),
    }
}

pub struct RecommendationsService;

impl RecommendationsService {
    /// Ranks `workers` for a project, falling back to an unranked list when the service fails.
    pub async fn candidates(
        api: &dyn RecommendationApi,
        project_id: Uuid,
        workers: Vec<(User, WorkerDetails)>,
        preferred: Option<AssignmentType>,
        avatars: &AvatarUrlHelper,
    ) -> CandidateList {
        match api.recommendations(project_id).await {
            Ok(recommended) => {
                tracing::debug!(
                    project_id = %project_id,
                    recommended = recommended.len(),
                    "Recommendations received"
                );
                rank_candidates(workers, Some(&recommended), preferred, avatars)
            }
            Err(e) => {
                tracing::warn!(
                    project_id = %project_id,
                    error = %e,
                    "Recommendation service unavailable, returning all workers"
                );
                rank_candidates(workers, None, preferred, avatars)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkillServiceConfig;

    #[test]
    fn part_time_suggestions_follow_tiers() {
        let part_time = Some(AssignmentType::PartTime);
        assert_eq!(suggested_hours(part_time, 40), (20, 50.0));
        assert_eq!(suggested_hours(part_time, 18), (15, 37.5));
        assert_eq!(suggested_hours(part_time, 7), (5, 12.5));
        assert_eq!(suggested_hours(part_time, 3), (3, 7.5));
    }

    #[test]
    fn other_types_take_what_is_available() {
        assert_eq!(suggested_hours(Some(AssignmentType::FullTime), 40), (40, 100.0));
        assert_eq!(suggested_hours(None, 12), (12, 30.0));
        assert_eq!(suggested_hours(Some(AssignmentType::Contract), -4), (0, 0.0));
    }

    #[test]
    fn endpoints_join_onto_base_path() {
        let client = SkillServiceClient::new(&SkillServiceConfig {
            base_url: "http://localhost:8001/api".to_string(),
            timeout_secs: 10,
        })
        .unwrap();
        let id = Uuid::nil();

        assert_eq!(
            client.endpoint(&format!("recommendations/{}", id)).unwrap().as_str(),
            "http://localhost:8001/api/recommendations/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            client.endpoint("extract_skills/").unwrap().as_str(),
            "http://localhost:8001/api/extract_skills/"
        );
    }

    #[test]
    fn service_payload_is_flattened() {
        let body = r#"{
            "recommendations": [
                {"recommended_employees": [
                    {"employee_id": "E-7", "user_id": "00000000-0000-0000-0000-000000000001",
                     "assignment_type": "Part-Time", "assigned_hours": 20, "allocation_percent": 50.0}
                ]},
                {"recommended_employees": []}
            ]
        }"#;
        let parsed: RecommendationResponse = serde_json::from_str(body).unwrap();
        let flat: Vec<RecommendedWorker> = parsed
            .recommendations
            .into_iter()
            .flat_map(|g| g.recommended_employees)
            .collect();

        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].assignment_type, AssignmentType::PartTime);
        assert_eq!(flat[0].employee_id.as_deref(), Some("E-7"));
    }
}
