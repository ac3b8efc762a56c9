//! When steps for task storage BDD scenarios.

use super::world::{TaskStorageWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskdb::task::{
    domain::{NewTask, TaskFilter, TaskId, TaskUpdate, UserId},
    ports::TaskStore,
};

#[when(r#"a task titled "{title}" with content "{content}" is created"#)]
fn create_task(
    world: &mut TaskStorageWorld,
    title: String,
    content: String,
) -> Result<(), eyre::Report> {
    let id = run_async(world.store.new_task(&NewTask::new(title, content)))
        .wrap_err("create task in scenario")?;
    world.last_created = Some(id);
    Ok(())
}

#[when("tasks are listed without a filter")]
fn list_all(world: &mut TaskStorageWorld) {
    world.listing = Some(run_async(world.store.tasks(TaskFilter::all())));
}

#[when("tasks are listed with task {task:i32} and author {author:i32}")]
fn list_filtered(world: &mut TaskStorageWorld, task: i32, author: i32) {
    world.listing = Some(run_async(
        world.store.tasks(TaskFilter::from_raw(task, author)),
    ));
}

#[when("tasks are listed for author {author:i32}")]
fn list_by_author(world: &mut TaskStorageWorld, author: i32) {
    world.listing = Some(run_async(world.store.tasks_by_author(UserId::new(author))));
}

#[when(r#"tasks labelled "{label}" are listed"#)]
fn list_by_label(world: &mut TaskStorageWorld, label: String) {
    world.listing = Some(run_async(world.store.tasks_by_label(&label)));
}

#[when("task {id:i32} is fetched")]
fn fetch_task(world: &mut TaskStorageWorld, id: i32) {
    world.fetched = Some(run_async(world.store.task_by_id(TaskId::new(id))));
}

#[when(r#"task {id:i32} is overwritten with title "{title}" closed at {closed:i64}"#)]
fn overwrite_task(world: &mut TaskStorageWorld, id: i32, title: String, closed: i64) {
    let update = TaskUpdate::new(title, "").with_closed(closed);
    world.last_outcome = Some(run_async(world.store.update_task(TaskId::new(id), &update)));
}

#[when("task {id:i32} is deleted")]
fn delete_task(world: &mut TaskStorageWorld, id: i32) {
    world.last_outcome = Some(run_async(world.store.delete_task(TaskId::new(id))));
}
