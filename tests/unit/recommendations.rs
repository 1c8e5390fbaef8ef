use async_trait::async_trait;
use resource_planner::config::AvatarConfig;
use resource_planner::db::enums::{AssignmentType, UserRole, WorkerStatus};
use resource_planner::db::models::{User, WorkerDetails};
use resource_planner::error::AppError;
use resource_planner::services::recommendations::{
    CvFile, RecommendationApi, RecommendationsService, RecommendedWorker, UploadedCv,
};
use resource_planner::utils::AvatarUrlHelper;
use uuid::Uuid;

struct FakeSkillService {
    picks: Option<Vec<RecommendedWorker>>,
}

#[async_trait]
impl RecommendationApi for FakeSkillService {
    async fn recommendations(&self, _project_id: Uuid) -> Result<Vec<RecommendedWorker>, AppError> {
        self.picks
            .clone()
            .ok_or_else(|| AppError::remote("recommendations timed out"))
    }

    async fn extract_skills(&self, _files: Vec<CvFile>) -> Result<Vec<String>, AppError> {
        Ok(vec![])
    }

    async fn upload_cv(&self, _employee_id: &str, _files: Vec<CvFile>) -> Result<Vec<UploadedCv>, AppError> {
        Ok(vec![])
    }

    async fn delete_cv(&self, _employee_id: &str, _file_name: &str) -> Result<(), AppError> {
        Ok(())
    }
}

fn worker(name: &str, available: i32) -> (User, WorkerDetails) {
    let now = chrono::Utc::now();
    let id = Uuid::new_v4();
    (
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: UserRole::Employee,
            password_hash: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        },
        WorkerDetails {
            user_id: id,
            employee_id: Some(format!("EMP-{}", name)),
            job_title: Some("Engineer".to_string()),
            experience_level: None,
            skills: vec!["rust".to_string()],
            total_available_hours: available,
            status: WorkerStatus::Available,
            profile_pic: None,
            updated_at: now,
        },
    )
}

fn avatars() -> AvatarUrlHelper {
    AvatarUrlHelper::new(&AvatarConfig {
        base_url: "https://ui-avatars.com/api/".to_string(),
    })
    .unwrap()
}

#[test]
fn recommended_workers_lead_the_list() {
    let workers = vec![worker("Ada", 40), worker("Grace", 30), worker("Linus", 12)];
    let linus = workers[2].0.id;
    let service = FakeSkillService {
        picks: Some(vec![RecommendedWorker {
            user_id: linus,
            employee_id: None,
            assignment_type: AssignmentType::PartTime,
            assigned_hours: 10,
            allocation_percent: 25.0,
        }]),
    };

    let list = tokio_test::block_on(RecommendationsService::candidates(
        &service,
        Uuid::new_v4(),
        workers,
        None,
        &avatars(),
    ));

    assert!(list.ranked);
    let names: Vec<&str> = list.candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Linus", "Ada", "Grace"]);
    assert!(list.candidates[0].recommended);
    assert_eq!(list.candidates[0].assigned_hours, 10);
    assert_eq!(list.candidates[0].assignment_type, AssignmentType::PartTime);
    assert!(!list.candidates[1].recommended);
}

#[test]
fn unreachable_service_returns_every_worker_unranked() {
    let service = FakeSkillService { picks: None };

    let list = tokio_test::block_on(RecommendationsService::candidates(
        &service,
        Uuid::new_v4(),
        vec![worker("Ada", 40), worker("Grace", 18)],
        Some(AssignmentType::PartTime),
        &avatars(),
    ));

    assert!(!list.ranked);
    assert_eq!(list.candidates.len(), 2);
    assert!(list.candidates.iter().all(|c| !c.recommended));
    assert_eq!(list.candidates[0].assigned_hours, 20);
    assert_eq!(list.candidates[1].assigned_hours, 15);
    assert_eq!(list.candidates[1].allocation_percent, 37.5);
}
