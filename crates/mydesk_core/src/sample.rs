//! Starter content for a fresh desk.
//!
//! Ids are fixed so the sample records are recognizable across restarts;
//! the high 64 bits encode the collection, the low bits the position.

use crate::model::entity::EntityId;
use crate::model::folder::Folder;
use crate::model::folder_item::{FolderItem, FolderItemBody};
use crate::model::link::Link;
use crate::model::note::Note;
use crate::model::task::{Priority, Task};
use crate::repo::collection::Collection;
use crate::repo::folder_items::FolderItemStore;
use crate::service::entity_store::EntityStore;
use chrono::NaiveDate;

const NOTES: u128 = 1;
const LINKS: u128 = 2;
const TASKS: u128 = 3;
const FOLDERS: u128 = 4;
const FOLDER_ITEMS: u128 = 5;

fn sample_id(collection: u128, position: u128) -> EntityId {
    EntityId::from_u128((collection << 64) | position)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Id of the "Interview Prep" sample folder, the one seeded with items.
pub fn interview_prep_folder_id() -> EntityId {
    sample_id(FOLDERS, 1)
}

/// Builds a store holding the sample collections. Tasks are due `today`.
pub fn sample_store(today: NaiveDate) -> EntityStore {
    let mut folder_items = FolderItemStore::new();
    folder_items.seed(interview_prep_folder_id(), sample_folder_items());

    EntityStore::from_parts(
        Collection::from_records(sample_notes()),
        Collection::from_records(sample_links()),
        Collection::from_records(sample_tasks(today)),
        Collection::from_records(sample_folders()),
        folder_items,
    )
}

fn sample_notes() -> Vec<Note> {
    let note = |position, title: &str, content: &str, category: &str, pinned, created_at| Note {
        id: sample_id(NOTES, position),
        title: title.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        pinned,
        created_at,
    };

    vec![
        note(
            1,
            "DSA - Binary Trees",
            "Tree traversal algorithms: inorder, preorder, postorder...",
            "DSA",
            true,
            ymd(2024, 1, 15),
        ),
        note(
            2,
            "OS - Process Management",
            "Process states, scheduling algorithms, context switching...",
            "OS",
            false,
            ymd(2024, 1, 14),
        ),
        note(
            3,
            "DBMS - Normalization",
            "1NF, 2NF, 3NF, BCNF forms and their applications...",
            "DBMS",
            true,
            ymd(2024, 1, 13),
        ),
    ]
}

fn sample_links() -> Vec<Link> {
    let link = |position, title: &str, url: &str, description: &str, category: &str| Link {
        id: sample_id(LINKS, position),
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        category: category.to_string(),
    };

    vec![
        link(
            1,
            "LeetCode",
            "https://leetcode.com",
            "Practice coding problems",
            "Study",
        ),
        link(
            2,
            "GitHub",
            "https://github.com",
            "Code repositories",
            "Daily Use",
        ),
        link(
            3,
            "MDN Web Docs",
            "https://developer.mozilla.org",
            "Web development reference",
            "Study",
        ),
    ]
}

fn sample_tasks(today: NaiveDate) -> Vec<Task> {
    let task = |position, title: &str, completed, priority| Task {
        id: sample_id(TASKS, position),
        title: title.to_string(),
        completed,
        date: today,
        priority,
    };

    vec![
        task(1, "Complete React project", false, Priority::High),
        task(2, "Study for OS exam", true, Priority::Medium),
        task(3, "Review DSA concepts", false, Priority::Low),
    ]
}

fn sample_folders() -> Vec<Folder> {
    let folder = |position, name: &str, description: &str| Folder {
        id: sample_id(FOLDERS, position),
        name: name.to_string(),
        description: description.to_string(),
    };

    vec![
        folder(
            1,
            "Interview Prep",
            "Important notes and resources for interviews",
        ),
        folder(2, "Project Ideas", "Random thoughts and project concepts"),
        folder(3, "Daily Reminders", "Things to remember daily"),
    ]
}

fn sample_folder_items() -> Vec<FolderItem> {
    vec![
        FolderItem {
            id: sample_id(FOLDER_ITEMS, 1),
            title: "Interview Questions - React".to_string(),
            category: Some("Interview Prep".to_string()),
            created_at: ymd(2024, 1, 15),
            body: FolderItemBody::Note {
                content: "Common React interview questions and answers...".to_string(),
                pinned: true,
            },
        },
        FolderItem {
            id: sample_id(FOLDER_ITEMS, 2),
            title: "System Design Primer".to_string(),
            category: Some("Study".to_string()),
            created_at: ymd(2024, 1, 14),
            body: FolderItemBody::Link {
                url: "https://github.com/donnemartin/system-design-primer".to_string(),
                description: "Learn how to design large-scale systems".to_string(),
            },
        },
        FolderItem {
            id: sample_id(FOLDER_ITEMS, 3),
            title: "Practice coding problems".to_string(),
            category: None,
            created_at: ymd(2024, 1, 16),
            body: FolderItemBody::Task {
                completed: false,
                priority: Priority::High,
            },
        },
    ]
}
