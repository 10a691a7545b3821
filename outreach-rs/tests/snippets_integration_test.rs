//! Integration tests for the snippet store

use outreach_rs::hydration::SnippetSource;
use outreach_rs::snippets::{CreateSnippetRequest, SnippetManager, UpdateSnippetRequest};
use outreach_rs::OutreachError;

/// Helper to create an in-memory database for testing
async fn setup_manager() -> SnippetManager {
    let pool = outreach_rs::db::connect("sqlite::memory:").await.unwrap();
    let manager = SnippetManager::new(pool);
    manager.init_db().await.unwrap();
    manager
}

fn request(slug: &str, text: &str) -> CreateSnippetRequest {
    CreateSnippetRequest {
        slug: slug.to_string(),
        name: None,
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_create_snippet() {
    let manager = setup_manager().await;

    let snippet = manager
        .create_snippet(request("  intro ", "Hope you're well, {{firstName}}."))
        .await
        .unwrap();

    assert_eq!(snippet.slug, "intro");
    assert_eq!(snippet.name, "intro");
    assert_eq!(snippet.text, "Hope you're well, {{firstName}}.");
}

#[tokio::test]
async fn test_create_rejects_bad_slugs() {
    let manager = setup_manager().await;

    let err = manager.create_snippet(request("   ", "x")).await.unwrap_err();
    assert!(matches!(err, OutreachError::Parse(_)));

    let err = manager.create_snippet(request("a}b", "x")).await.unwrap_err();
    assert!(matches!(err, OutreachError::Parse(_)));
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
    let manager = setup_manager().await;
    manager.create_snippet(request("intro", "One")).await.unwrap();

    let err = manager.create_snippet(request("intro", "Two")).await.unwrap_err();
    assert!(matches!(err, OutreachError::Conflict(_)));
}

#[tokio::test]
async fn test_get_and_find_by_slug() {
    let manager = setup_manager().await;
    let created = manager.create_snippet(request("intro", "Hello")).await.unwrap();

    let by_id = manager.get_snippet(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);

    let by_slug = manager.find_snippet_by_slug("intro").await.unwrap().unwrap();
    assert_eq!(by_slug.id, created.id);

    assert!(manager.find_snippet_by_slug("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_snippet() {
    let manager = setup_manager().await;
    let created = manager.create_snippet(request("intro", "Hello")).await.unwrap();

    let updated = manager
        .update_snippet(
            &created.id,
            UpdateSnippetRequest {
                name: Some("Intro line".to_string()),
                text: Some("Hi there".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.slug, "intro");
    assert_eq!(updated.name, "Intro line");
    assert_eq!(updated.text, "Hi there");
    assert!(updated.updated_at >= created.updated_at);

    let unchanged = manager
        .update_snippet(&created.id, UpdateSnippetRequest::default())
        .await
        .unwrap();
    assert_eq!(unchanged.text, "Hi there");

    let err = manager
        .update_snippet("missing", UpdateSnippetRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, OutreachError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_snippet() {
    let manager = setup_manager().await;
    let created = manager.create_snippet(request("intro", "Hello")).await.unwrap();

    manager.delete_snippet(&created.id).await.unwrap();
    assert!(manager.get_snippet(&created.id).await.unwrap().is_none());

    let err = manager.delete_snippet(&created.id).await.unwrap_err();
    assert!(matches!(err, OutreachError::NotFound(_)));
}

#[tokio::test]
async fn test_list_snippets_sorted_by_slug() {
    let manager = setup_manager().await;
    manager.create_snippet(request("zeta", "z")).await.unwrap();
    manager.create_snippet(request("alpha", "a")).await.unwrap();

    let slugs: Vec<String> = manager
        .list_snippets()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.slug)
        .collect();
    assert_eq!(slugs, vec!["alpha", "zeta"]);
}

#[tokio::test]
async fn test_default_snippets_are_idempotent() {
    let manager = setup_manager().await;
    manager
        .create_snippet(request("as_you_remember", "Custom wording"))
        .await
        .unwrap();

    assert_eq!(manager.create_default_snippets().await.unwrap(), 3);
    assert_eq!(manager.create_default_snippets().await.unwrap(), 0);

    let kept = manager.find_by_slug("as_you_remember").await.unwrap().unwrap();
    assert_eq!(kept.text, "Custom wording");
    assert_eq!(manager.list_snippets().await.unwrap().len(), 4);
}
