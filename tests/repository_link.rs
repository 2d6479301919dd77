use sqlx::PgPool;
use std::sync::Arc;
use tinylink::domain::entities::NewLink;
use tinylink::domain::repositories::LinkRepository;
use tinylink::error::AppError;
use tinylink::infrastructure::persistence::PgLinkRepository;

fn new_link(code: &str, target: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        target: target.to_string(),
    }
}

#[sqlx::test]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.target, "https://example.com");
    assert_eq!(link.clicks, 0);
    assert!(link.last_clicked.is_none());
}

#[sqlx::test]
async fn test_create_duplicate_code_conflicts(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup12345", "https://first.com"))
        .await
        .unwrap();
    let result = repo.create(new_link("dup12345", "https://second.com")).await;

    assert!(matches!(result, Err(AppError::CodeConflict { .. })));
}

#[sqlx::test]
async fn test_concurrent_create_same_code(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let (a, b) = tokio::join!(
        repo.create(new_link("race1234", "https://a.com")),
        repo.create(new_link("race1234", "https://b.com")),
    );

    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
    assert_eq!(repo.count_links().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_exists(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(!repo.exists("exist123").await.unwrap());
    repo.create(new_link("exist123", "https://example.com"))
        .await
        .unwrap();
    assert!(repo.exists("exist123").await.unwrap());
}

#[sqlx::test]
async fn test_find_by_code(pool: PgPool) {
    sqlx::query("INSERT INTO links (code, target_url) VALUES ($1, $2)")
        .bind("abc123")
        .bind("https://example.com")
        .execute(&pool)
        .await
        .unwrap();

    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.find_by_code("abc123").await.unwrap();

    assert_eq!(link.unwrap().target, "https://example.com");
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_newest_first(pool: PgPool) {
    for (code, age) in [("old12345", "2 hours"), ("mid12345", "1 hour"), ("new12345", "0 hours")] {
        sqlx::query(
            "INSERT INTO links (code, target_url, created_at) VALUES ($1, 'https://example.com', NOW() - $2::INTERVAL)",
        )
        .bind(code)
        .bind(age)
        .execute(&pool)
        .await
        .unwrap();
    }

    let repo = PgLinkRepository::new(Arc::new(pool));
    let codes: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|link| link.code)
        .collect();

    assert_eq!(codes, ["new12345", "mid12345", "old12345"]);
}

#[sqlx::test]
async fn test_delete_twice(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("del12345", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete("del12345").await.unwrap());
    assert!(!repo.delete("del12345").await.unwrap());
    assert!(repo.find_by_code("del12345").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_record_click(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("click123", "https://example.com/page"))
        .await
        .unwrap();

    let target = repo.record_click("click123").await.unwrap();
    assert_eq!(target.as_deref(), Some("https://example.com/page"));

    let link = repo.find_by_code("click123").await.unwrap().unwrap();
    assert_eq!(link.clicks, 1);
    assert!(link.last_clicked.is_some());
}

#[sqlx::test]
async fn test_record_click_unknown_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.record_click("nothere1").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_concurrent_clicks_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.create(new_link("busy1234", "https://example.com"))
        .await
        .unwrap();

    let started = chrono::Utc::now();
    let mut set = tokio::task::JoinSet::new();
    for _ in 0..25 {
        let repo = repo.clone();
        set.spawn(async move { repo.record_click("busy1234").await });
    }
    while let Some(result) = set.join_next().await {
        assert!(result.unwrap().unwrap().is_some());
    }

    let link = repo.find_by_code("busy1234").await.unwrap().unwrap();
    assert_eq!(link.clicks, 25);
    assert!(link.last_clicked.unwrap() >= started - chrono::Duration::seconds(1));
}

#[sqlx::test]
async fn test_counts(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert_eq!(repo.count_links().await.unwrap(), 0);
    assert_eq!(repo.total_clicks().await.unwrap(), 0);

    repo.create(new_link("count001", "https://a.com")).await.unwrap();
    repo.create(new_link("count002", "https://b.com")).await.unwrap();
    repo.record_click("count001").await.unwrap();
    repo.record_click("count001").await.unwrap();
    repo.record_click("count002").await.unwrap();

    assert_eq!(repo.count_links().await.unwrap(), 2);
    assert_eq!(repo.total_clicks().await.unwrap(), 3);
}

#[sqlx::test]
async fn test_schema_rejects_malformed_codes(pool: PgPool) {
    let result = sqlx::query("INSERT INTO links (code, target_url) VALUES ('ab', 'https://x.com')")
        .execute(&pool)
        .await;

    assert!(result.is_err());
}
