//! In-memory to-do list. Tasks live for the duration of the app run; the
//! newest task always sits at the top of the list.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use tauri::State;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_percent: u32,
}

#[derive(Default)]
pub struct TaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl TaskStore {
    pub fn add(&self, new_task: NewTask) -> Result<Task, String> {
        let title = new_task.title.trim();
        if title.is_empty() {
            return Err("task title cannot be empty".to_string());
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: new_task.description.trim().to_string(),
            completed: false,
            priority: new_task.priority,
            due_date: new_task.due_date,
            created_at: Utc::now(),
        };

        let mut tasks = self.tasks.lock().unwrap();
        tasks.insert(0, task.clone());
        Ok(task)
    }

    pub fn toggle(&self, id: &str) -> Result<Task, String> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| format!("no task with id {id}"))?;
        task.completed = !task.completed;
        Ok(task.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), String> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(format!("no task with id {id}"));
        }
        Ok(())
    }

    pub fn list(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    pub fn stats(&self) -> TaskStats {
        let tasks = self.tasks.lock().unwrap();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let completion_percent = if tasks.is_empty() {
            0
        } else {
            (completed * 100 / tasks.len()) as u32
        };
        TaskStats {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
            completion_percent,
        }
    }
}

#[tauri::command]
pub fn add_task(state: State<'_, AppState>, task: NewTask) -> Result<Task, String> {
    let task = state.tasks.add(task)?;
    info!("added task {}", task.id);
    Ok(task)
}

#[tauri::command]
pub fn toggle_task(state: State<'_, AppState>, task_id: String) -> Result<Task, String> {
    state.tasks.toggle(&task_id)
}

#[tauri::command]
pub fn delete_task(state: State<'_, AppState>, task_id: String) -> Result<(), String> {
    state.tasks.delete(&task_id)
}

#[tauri::command]
pub fn list_tasks(state: State<'_, AppState>) -> Vec<Task> {
    state.tasks.list()
}

#[tauri::command]
pub fn task_stats(state: State<'_, AppState>) -> TaskStats {
    state.tasks.stats()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            priority: TaskPriority::Medium,
            due_date: None,
        }
    }

    #[test]
    fn newest_task_lands_on_top() {
        let store = TaskStore::default();
        store.add(new_task("first")).unwrap();
        store.add(new_task("second")).unwrap();

        let tasks = store.list();
        assert_eq!(tasks[0].title, "second");
        assert_eq!(tasks[1].title, "first");
    }

    #[test]
    fn blank_title_is_rejected() {
        let store = TaskStore::default();
        assert!(store.add(new_task("   ")).is_err());
        assert!(store.list().is_empty());
    }

    #[test]
    fn toggle_flips_completion_both_ways() {
        let store = TaskStore::default();
        let task = store.add(new_task("stretch")).unwrap();

        assert!(store.toggle(&task.id).unwrap().completed);
        assert!(!store.toggle(&task.id).unwrap().completed);
    }

    #[test]
    fn delete_removes_only_the_named_task() {
        let store = TaskStore::default();
        let keep = store.add(new_task("keep")).unwrap();
        let gone = store.add(new_task("gone")).unwrap();

        store.delete(&gone.id).unwrap();
        let tasks = store.list();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, keep.id);

        assert!(store.delete(&gone.id).is_err());
    }

    #[test]
    fn stats_split_completed_from_pending() {
        let store = TaskStore::default();
        let a = store.add(new_task("a")).unwrap();
        store.add(new_task("b")).unwrap();
        store.toggle(&a.id).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completion_percent, 50);
    }

    #[test]
    fn empty_store_reports_zero_percent() {
        let store = TaskStore::default();
        assert_eq!(store.stats().completion_percent, 0);
    }
}
