//! マイグレーション統合テスト

use account_api::db::migrations::{initialize_database, run_migrations};

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let temp_dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", temp_dir.path().join("accounts.db").display());

    {
        let pool = initialize_database(&url).await.unwrap();
        account_api::accounts::create_user(&pool, "persist@example.com", "persistpass", None)
            .await
            .unwrap();
        pool.close().await;
    }

    let pool = initialize_database(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let user = account_api::accounts::find_by_email(&pool, "persist@example.com")
        .await
        .unwrap();
    assert!(user.is_some());
}
