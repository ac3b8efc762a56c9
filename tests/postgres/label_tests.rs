//! `PostgreSQL` integration tests for label associations and join lookups.

use rstest::rstest;
use taskdb::task::{
    domain::{LabelId, TaskId},
    ports::{LabelStore, TaskStore, TaskStoreError},
};

use crate::postgres::helpers::{BoxError, StoreContext, context, seed_tasks};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_tasks_by_label_joins_through_associations(
    context: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let ids = seed_tasks(&ctx.store, &["crash", "typo", "slow"]).await?;
    let [crash, typo, slow] = ids.as_slice() else {
        return Err("expected three seeded tasks".into());
    };
    let bug = ctx.store.create_label("bug").await?;
    let docs = ctx.store.create_label("docs").await?;

    ctx.store.attach_label(*slow, bug).await?;
    ctx.store.attach_label(*crash, bug).await?;
    ctx.store.attach_label(*typo, docs).await?;

    let bugs = ctx.store.tasks_by_label("bug").await?;

    assert_eq!(
        bugs.iter().map(|task| task.id()).collect::<Vec<_>>(),
        vec![*crash, *slow]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_tasks_by_label_matches_exactly(
    context: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let ids = seed_tasks(&ctx.store, &["tagged"]).await?;
    let id = *ids.first().ok_or("expected seeded task")?;
    let bug = ctx.store.create_label("bug").await?;
    ctx.store.attach_label(id, bug).await?;

    assert!(ctx.store.tasks_by_label("Bug").await?.is_empty());
    assert!(ctx.store.tasks_by_label("bu").await?.is_empty());
    assert!(ctx.store.tasks_by_label("missing").await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_repeated_attachment_does_not_duplicate_rows(
    context: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let ids = seed_tasks(&ctx.store, &["tagged"]).await?;
    let id = *ids.first().ok_or("expected seeded task")?;
    let bug = ctx.store.create_label("bug").await?;

    ctx.store.attach_label(id, bug).await?;
    ctx.store.attach_label(id, bug).await?;

    assert_eq!(ctx.store.tasks_by_label("bug").await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_deleting_a_task_cascades_to_associations(
    context: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let ids = seed_tasks(&ctx.store, &["tagged"]).await?;
    let id = *ids.first().ok_or("expected seeded task")?;
    let bug = ctx.store.create_label("bug").await?;
    ctx.store.attach_label(id, bug).await?;

    ctx.store.delete_task(id).await?;

    assert!(ctx.store.tasks_by_label("bug").await?.is_empty());
    Ok(())
}

#[rstest]
#[case::missing_task(TaskId::new(404), None)]
#[case::missing_label(TaskId::new(1), Some(LabelId::new(404)))]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_attach_label_rejects_dangling_references(
    context: Result<StoreContext, BoxError>,
    #[case] task_id: TaskId,
    #[case] label_override: Option<LabelId>,
) -> Result<(), BoxError> {
    let ctx = context?;
    seed_tasks(&ctx.store, &["tagged"]).await?;
    let bug = ctx.store.create_label("bug").await?;

    let result = ctx
        .store
        .attach_label(task_id, label_override.unwrap_or(bug))
        .await;

    assert!(
        matches!(result, Err(TaskStoreError::Query(_))),
        "expected query error, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_duplicate_label_names_are_rejected(
    context: Result<StoreContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    ctx.store.create_label("bug").await?;

    let result = ctx.store.create_label("bug").await;

    assert!(
        matches!(result, Err(TaskStoreError::Query(_))),
        "expected query error, got {result:?}"
    );
    Ok(())
}
