use database::{SqliteTodoRepository, TodoError, TodoPatch, TodoRepository};

fn patch(text: Option<&str>, due_date: Option<&str>, completed: Option<bool>) -> TodoPatch {
    TodoPatch {
        id: None,
        text: text.map(str::to_string),
        due_date: due_date.map(str::to_string),
        completed,
    }
}

#[tokio::test]
async fn file_database_full_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("todos.sqlite");
    let url = format!("sqlite://{}", db_path.display());

    let repo = SqliteTodoRepository::new(&url).await.unwrap();
    repo.ensure_table().await.unwrap();

    // Create
    repo.insert(7, patch(Some("a"), Some("2024-01-01"), Some(false)))
        .await
        .unwrap();

    // Read
    let todos = repo.list_all().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, 7);
    assert_eq!(todos[0].text.as_deref(), Some("a"));
    assert_eq!(todos[0].due_date.as_deref(), Some("2024-01-01"));
    assert!(!todos[0].completed);

    // Update
    repo.update(7, patch(None, None, Some(true))).await.unwrap();
    let todo = repo.get_by_id(7).await.unwrap().unwrap();
    assert!(todo.completed);
    assert_eq!(todo.text.as_deref(), Some("a"));

    // Delete
    repo.delete(7).await.unwrap();
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn file_database_schema_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("todos.sqlite");
    let url = format!("sqlite://{}", db_path.display());

    {
        let repo = SqliteTodoRepository::new(&url).await.unwrap();
        repo.ensure_table().await.unwrap();
        repo.insert(1, patch(Some("persisted"), None, None))
            .await
            .unwrap();
    }

    // A second process start runs the initializer again against existing state
    let repo = SqliteTodoRepository::new(&url).await.unwrap();
    repo.ensure_table().await.unwrap();

    let todos = repo.list_all().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text.as_deref(), Some("persisted"));
}

#[tokio::test]
async fn update_and_delete_agree_on_missing_ids() {
    let repo = SqliteTodoRepository::new(":memory:").await.unwrap();
    repo.ensure_table().await.unwrap();

    for id in [0, 1, 999, -5] {
        let update = repo.update(id, patch(Some("x"), None, None)).await;
        assert!(update.unwrap_err().is_not_found());

        let delete = repo.delete(id).await;
        assert!(delete.unwrap_err().is_not_found());
    }
}

#[tokio::test]
async fn duplicate_insert_reports_duplicate_id() {
    let repo = SqliteTodoRepository::new(":memory:").await.unwrap();
    repo.ensure_table().await.unwrap();

    repo.insert(5, patch(Some("a"), None, None)).await.unwrap();
    let result = repo.insert(5, TodoPatch::default()).await;

    assert_eq!(result.unwrap_err(), TodoError::DuplicateId(5));
}
