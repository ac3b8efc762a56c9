//! Given steps for task storage BDD scenarios.

use super::world::{TaskStorageWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdb::task::{
    domain::{NewTask, TaskFilter, TaskId, TaskUpdate, UserId},
    ports::{LabelStore, TaskStore},
};

#[given("an empty task store")]
fn empty_task_store(world: &mut TaskStorageWorld) -> Result<(), eyre::Report> {
    let existing = run_async(world.store.tasks(TaskFilter::all()))
        .wrap_err("list tasks in fresh store")?;
    if !existing.is_empty() {
        return Err(eyre::eyre!("expected an empty store, found {} tasks", existing.len()));
    }
    Ok(())
}

#[given(r#"a task titled "{title}" exists"#)]
fn task_titled_exists(world: &mut TaskStorageWorld, title: String) -> Result<(), eyre::Report> {
    run_async(world.store.new_task(&NewTask::new(title, "")))
        .wrap_err("create titled task for scenario")?;
    Ok(())
}

#[given("{count:usize} tasks exist")]
fn tasks_exist(world: &mut TaskStorageWorld, count: usize) -> Result<(), eyre::Report> {
    for index in 1..=count {
        run_async(world.store.new_task(&NewTask::new(format!("task {index}"), "")))
            .wrap_err("create numbered task for scenario")?;
    }
    Ok(())
}

#[given("task {id:i32} is authored by user {author:i32}")]
fn task_is_authored_by(
    world: &mut TaskStorageWorld,
    id: i32,
    author: i32,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id);
    let current = run_async(world.store.task_by_id(task_id)).wrap_err("load task to reassign")?;
    let update = TaskUpdate::from(&current).with_author(UserId::new(author));
    run_async(world.store.update_task(task_id, &update)).wrap_err("assign task author")?;
    Ok(())
}

#[given(r#"task {id:i32} is labelled "{label}""#)]
fn task_is_labelled(
    world: &mut TaskStorageWorld,
    id: i32,
    label: String,
) -> Result<(), eyre::Report> {
    let label_id = if let Some(existing) = world.labels.get(&label) {
        *existing
    } else {
        let created =
            run_async(world.store.create_label(&label)).wrap_err("create label for scenario")?;
        world.labels.insert(label, created);
        created
    };
    run_async(world.store.attach_label(TaskId::new(id), label_id))
        .wrap_err("attach label for scenario")?;
    Ok(())
}
