//! 习惯创建与课程冲突集成测试
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test habit_conflict_test -- --ignored
//! ```

use habit_service::error::HabitError;
use habit_service::service::HabitService;
use habit_service::service::dto::CreateHabitRequest;
use sqlx::PgPool;
use uuid::Uuid;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

async fn setup_pool() -> PgPool {
    let pool = PgPool::connect(&database_url())
        .await
        .expect("数据库连接失败");
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("迁移执行失败");
    pool
}

async fn seed_user(pool: &PgPool) -> Uuid {
    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO profiles (id, full_name) VALUES ($1, 'IntegTest User')")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("插入测试用户失败");
    user_id
}

async fn seed_class(pool: &PgPool, user_id: Uuid, day: &str, start: &str, end: &str) {
    sqlx::query(
        r#"
        INSERT INTO class_schedules (user_id, day, subject, start_time, end_time)
        VALUES ($1, $2, 'Math', $3, $4)
        "#,
    )
    .bind(user_id)
    .bind(day)
    .bind(start)
    .bind(end)
    .execute(pool)
    .await
    .expect("插入测试课程失败");
}

fn request(name: &str, frequency: &[&str], reminder: Option<&str>) -> CreateHabitRequest {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "frequency": frequency,
        "reminder_time": reminder,
    }))
    .expect("请求反序列化失败")
}

#[tokio::test]
#[ignore]
async fn test_create_habit_without_reminder_succeeds() {
    let pool = setup_pool().await;
    let user_id = seed_user(&pool).await;
    seed_class(&pool, user_id, "Monday", "08:30", "09:30").await;

    let service = HabitService::new(pool.clone());
    let habit = service
        .create(user_id, request("Read", &["Monday"], None))
        .await
        .expect("无提醒时间的习惯不做冲突检测");

    assert_eq!(habit.name, "Read");
    assert_eq!(habit.current_streak, 0);
}

#[tokio::test]
#[ignore]
async fn test_reminder_inside_class_rejected() {
    let pool = setup_pool().await;
    let user_id = seed_user(&pool).await;
    seed_class(&pool, user_id, "Monday", "08:30", "09:30").await;

    let service = HabitService::new(pool.clone());
    let err = service
        .create(user_id, request("Read", &["Monday"], Some("09:00")))
        .await
        .expect_err("提醒落在课程区间内应拒绝");

    match err {
        HabitError::ScheduleConflict { subject, day, .. } => {
            assert_eq!(subject, "Math");
            assert_eq!(day, "Monday");
        }
        other => panic!("期望 ScheduleConflict，实际: {other:?}"),
    }
}

#[tokio::test]
#[ignore]
async fn test_reminder_at_class_end_allowed() {
    let pool = setup_pool().await;
    let user_id = seed_user(&pool).await;
    seed_class(&pool, user_id, "Monday", "08:30", "09:30").await;

    let service = HabitService::new(pool.clone());
    // 区间左闭右开，09:30 恰好下课，不冲突
    let habit = service
        .create(user_id, request("Read", &["Monday"], Some("09:30")))
        .await
        .expect("与课程结束时间相同不应冲突");

    assert_eq!(habit.reminder_time.as_deref(), Some("09:30"));
}

#[tokio::test]
#[ignore]
async fn test_conflict_scoped_to_matching_day() {
    let pool = setup_pool().await;
    let user_id = seed_user(&pool).await;
    seed_class(&pool, user_id, "Monday", "08:30", "09:30").await;

    let service = HabitService::new(pool.clone());
    // 同一时刻但不同星期，不冲突
    let habit = service
        .create(user_id, request("Read", &["Tuesday"], Some("09:00")))
        .await
        .expect("不同星期不应冲突");

    assert_eq!(habit.frequency, vec!["Tuesday".to_string()]);
}

#[tokio::test]
#[ignore]
async fn test_other_users_classes_ignored() {
    let pool = setup_pool().await;
    let alice = seed_user(&pool).await;
    let bob = seed_user(&pool).await;
    seed_class(&pool, alice, "Monday", "08:30", "09:30").await;

    let service = HabitService::new(pool.clone());
    service
        .create(bob, request("Read", &["Monday"], Some("09:00")))
        .await
        .expect("他人的课程不参与冲突检测");
}

#[tokio::test]
#[ignore]
async fn test_invalid_weekday_rejected() {
    let pool = setup_pool().await;
    let user_id = seed_user(&pool).await;

    let service = HabitService::new(pool.clone());
    let err = service
        .create(user_id, request("Read", &["Funday"], None))
        .await
        .expect_err("非法星期名应拒绝");
    assert!(matches!(err, HabitError::Validation(_)));
}
