use chrono::Utc;

use arsa_nexus::domain::announcement::NewAnnouncement;
use arsa_nexus::domain::job::{JobKind, JobStatus, NewJob, UpdateJob};
use arsa_nexus::domain::product::NewProduct;
use arsa_nexus::domain::training::{NewTraining, UpdateTraining};
use arsa_nexus::domain::user::{NewUser, UpdateUser};
use arsa_nexus::repository::errors::RepositoryError;
use arsa_nexus::repository::{
    AnnouncementReader, AnnouncementWriter, AnnouncementListQuery, DieselRepository, JobListQuery,
    JobReader, JobWriter, ProductListQuery, ProductReader, ProductWriter, TrainingListQuery,
    TrainingReader, TrainingWriter, UserListQuery, UserReader, UserWriter,
};

mod common;

fn repo(db: &common::TestDb) -> DieselRepository {
    DieselRepository::new(db.pool().clone())
}

fn sample_job(title: &str, kind: JobKind, status: JobStatus, featured: bool) -> NewJob {
    NewJob {
        title: title.to_string(),
        company: "Arsa".to_string(),
        description: "Build things".to_string(),
        category: "Engineering".to_string(),
        location: "Yerevan".to_string(),
        location_type: "Remote".to_string(),
        level: "Mid".to_string(),
        kind,
        featured,
        urgent: false,
        deadline: None,
        status,
    }
}

#[test]
fn test_user_crud_and_search() {
    let db = common::TestDb::new("test_user_crud.db");
    let repo = repo(&db);

    let created = repo
        .create_user(&NewUser::new(
            "Amina".to_string(),
            "amina@example.com".to_string(),
            "admin".to_string(),
        ))
        .unwrap();
    assert!(created.active);
    assert_eq!(created.role, "admin");

    repo.create_user(&NewUser::new(
        "Boris".to_string(),
        "boris@example.com".to_string(),
        "user".to_string(),
    ))
    .unwrap();

    let fetched = repo.get_user_by_email("amina@example.com").unwrap();
    assert_eq!(fetched, Some(created.clone()));

    let (total, items) = repo
        .list_users(UserListQuery::new().search("ami"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Amina");

    let (total, items) = repo
        .list_users(UserListQuery::new().role("admin".to_string()))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, created.id);

    let updated = repo
        .update_user(
            created.id,
            &UpdateUser {
                active: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(!updated.active);

    repo.delete_user(created.id).unwrap();
    assert!(repo.get_user_by_id(created.id).unwrap().is_none());
}

#[test]
fn test_delete_missing_user_is_not_found() {
    let db = common::TestDb::new("test_user_delete_missing.db");
    let repo = repo(&db);

    let err = repo.delete_user(9999).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_user_list_pagination() {
    let db = common::TestDb::new("test_user_pagination.db");
    let repo = repo(&db);

    for i in 0..25 {
        repo.create_user(&NewUser::new(
            format!("User {i}"),
            format!("user{i}@example.com"),
            "user".to_string(),
        ))
        .unwrap();
    }

    let (total, items) = repo
        .list_users(UserListQuery::new().paginate(3, 10))
        .unwrap();
    assert_eq!(total, 25);
    assert_eq!(items.len(), 5);

    let (total, items) = repo
        .list_users(UserListQuery::new().paginate(4, 10))
        .unwrap();
    assert_eq!(total, 25);
    assert!(items.is_empty());
}

#[test]
fn test_training_filters_and_update() {
    let db = common::TestDb::new("test_training_filters.db");
    let repo = repo(&db);

    let rust = repo
        .create_training(&NewTraining::new(
            "Rust Basics".to_string(),
            "Ownership and borrowing".to_string(),
            "Programming".to_string(),
            "Beginner".to_string(),
            49.0,
            true,
        ))
        .unwrap();
    repo.create_training(&NewTraining::new(
        "Figma Deep Dive".to_string(),
        "Design systems".to_string(),
        "Design".to_string(),
        "Advanced".to_string(),
        99.0,
        false,
    ))
    .unwrap();

    let (total, items) = repo
        .list_trainings(TrainingListQuery::new().category("Programming".to_string()))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, rust.id);

    let (total, _) = repo
        .list_trainings(TrainingListQuery::new().search("design"))
        .unwrap();
    assert_eq!(total, 1);

    let updated = repo
        .update_training(
            rust.id,
            &UpdateTraining {
                active: Some(false),
                price: Some(59.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(!updated.active);
    assert_eq!(updated.price, 59.0);

    let (total, _) = repo
        .list_trainings(TrainingListQuery::new().active(true))
        .unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_job_kind_and_status_filters() {
    let db = common::TestDb::new("test_job_filters.db");
    let repo = repo(&db);

    repo.create_job(&sample_job(
        "Backend Engineer",
        JobKind::Job,
        JobStatus::Active,
        false,
    ))
    .unwrap();
    repo.create_job(&sample_job(
        "QA Intern",
        JobKind::Internship,
        JobStatus::Active,
        false,
    ))
    .unwrap();
    let closed = repo
        .create_job(&sample_job(
            "Closed Intern",
            JobKind::Internship,
            JobStatus::Closed,
            false,
        ))
        .unwrap();

    // Without filters everything comes back, closed postings included.
    let (total, _) = repo.list_jobs(JobListQuery::new()).unwrap();
    assert_eq!(total, 3);

    let (total, items) = repo
        .list_jobs(
            JobListQuery::new()
                .kind(JobKind::Internship)
                .status(JobStatus::Active),
        )
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].title, "QA Intern");

    let updated = repo
        .update_job(
            closed.id,
            &UpdateJob {
                status: Some(JobStatus::Active),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.status, JobStatus::Active);

    let (total, _) = repo
        .list_jobs(JobListQuery::new().status(JobStatus::Active))
        .unwrap();
    assert_eq!(total, 3);
}

#[test]
fn test_featured_jobs_come_first() {
    let db = common::TestDb::new("test_job_featured_order.db");
    let repo = repo(&db);

    repo.create_job(&sample_job(
        "Plain",
        JobKind::Job,
        JobStatus::Active,
        false,
    ))
    .unwrap();
    repo.create_job(&sample_job(
        "Featured",
        JobKind::Job,
        JobStatus::Active,
        true,
    ))
    .unwrap();

    let (_, items) = repo.list_jobs(JobListQuery::new()).unwrap();
    assert_eq!(items[0].title, "Featured");
    assert_eq!(items[1].title, "Plain");
}

#[test]
fn test_product_crud_and_search() {
    let db = common::TestDb::new("test_product_crud.db");
    let repo = repo(&db);

    let notebook = repo
        .create_product(&NewProduct::new(
            "Notebook".to_string(),
            "Dotted pages".to_string(),
            "Stationery".to_string(),
            5.0,
        ))
        .unwrap();
    repo.create_product(&NewProduct::new(
        "Sticker Pack".to_string(),
        "Rustacean stickers".to_string(),
        "Merch".to_string(),
        3.0,
    ))
    .unwrap();

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("note"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, notebook.id);

    let (total, _) = repo
        .list_products(ProductListQuery::new().category("Merch".to_string()))
        .unwrap();
    assert_eq!(total, 1);

    repo.delete_product(notebook.id).unwrap();
    assert!(repo.get_product_by_id(notebook.id).unwrap().is_none());
}

#[test]
fn test_announcement_crud_sanitizes_body() {
    let db = common::TestDb::new("test_announcement_crud.db");
    let repo = repo(&db);

    let created = repo
        .create_announcement(&NewAnnouncement::new(
            "Launch".to_string(),
            "<p>We are live</p><script>alert(1)</script>".to_string(),
            Utc::now().naive_utc(),
        ))
        .unwrap();
    assert!(created.body.contains("<p>We are live</p>"));
    assert!(!created.body.contains("script"));

    let (total, items) = repo
        .list_announcements(AnnouncementListQuery::new().active(true))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, created.id);

    repo.delete_announcement(created.id).unwrap();
    let (total, _) = repo
        .list_announcements(AnnouncementListQuery::new())
        .unwrap();
    assert_eq!(total, 0);
}
