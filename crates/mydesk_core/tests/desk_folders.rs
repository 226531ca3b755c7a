use mydesk_core::sample::interview_prep_folder_id;
use mydesk_core::{
    Desk, DeskConfig, EntityId, FolderDraft, FolderItemBody, FolderItemDraft, FolderItemPatch,
    FolderPatch, ItemKind, MemoryStorage, Priority, Screen, Section, UserProfile,
};

fn sample_desk() -> Desk<MemoryStorage> {
    let mut desk = Desk::open(MemoryStorage::new(), &DeskConfig::default()).unwrap();
    desk.login(UserProfile::new("Grace Hopper", "grace@example.com"))
        .unwrap();
    desk
}

fn count_of(desk: &Desk<MemoryStorage>, folder_id: EntityId) -> usize {
    desk.folders()
        .into_iter()
        .find(|summary| summary.folder.id == folder_id)
        .map(|summary| summary.item_count)
        .unwrap()
}

#[test]
fn sample_counts_are_derived_from_items() {
    let desk = sample_desk();
    let counts: Vec<(String, usize)> = desk
        .folders()
        .into_iter()
        .map(|summary| (summary.folder.name, summary.item_count))
        .collect();

    assert_eq!(
        counts,
        vec![
            ("Interview Prep".to_string(), 3),
            ("Project Ideas".to_string(), 0),
            ("Daily Reminders".to_string(), 0),
        ]
    );
}

#[test]
fn item_count_returns_after_add_then_remove() {
    let mut desk = sample_desk();
    let folder = interview_prep_folder_id();
    let before = count_of(&desk, folder);

    let item = desk
        .add_folder_item(folder, FolderItemDraft::task("Mock interview", Priority::High))
        .unwrap();
    assert_eq!(count_of(&desk, folder), before + 1);
    assert_eq!(desk.folder_items(folder)[0].id, item.id);

    assert!(desk.remove_folder_item(folder, item.id));
    assert_eq!(count_of(&desk, folder), before);
}

#[test]
fn folder_item_rules_match_kind() {
    let mut desk = sample_desk();
    let folder = interview_prep_folder_id();

    assert!(desk
        .add_folder_item(folder, FolderItemDraft::link("  ", "https://example.com", ""))
        .is_none());
    assert!(desk
        .add_folder_item(folder, FolderItemDraft::note("", "body"))
        .is_none());
    assert!(desk
        .add_folder_item(EntityId::nil(), FolderItemDraft::note("t", "b"))
        .is_none());
    assert_eq!(count_of(&desk, folder), 3);

    let link = desk
        .add_folder_item(folder, FolderItemDraft::link("Rust book", "https://doc.rust-lang.org/book", ""))
        .unwrap();
    assert_eq!(link.kind(), ItemKind::Link);

    let updated = desk
        .update_folder_item(
            folder,
            link.id,
            FolderItemPatch {
                description: Some("ownership chapters".to_string()),
                completed: Some(true),
                ..FolderItemPatch::default()
            },
        )
        .unwrap();
    assert_eq!(
        updated.body,
        FolderItemBody::Link {
            url: "https://doc.rust-lang.org/book".to_string(),
            description: "ownership chapters".to_string(),
        }
    );
}

#[test]
fn kind_toggles_flip_twice_back() {
    let mut desk = sample_desk();
    let folder = interview_prep_folder_id();
    let task = desk
        .folder_items(folder)
        .iter()
        .find(|item| item.kind() == ItemKind::Task)
        .cloned()
        .unwrap();

    let done = desk.toggle_folder_task(folder, task.id).unwrap();
    assert!(matches!(done.body, FolderItemBody::Task { completed: true, .. }));
    assert_eq!(desk.toggle_folder_task(folder, task.id).unwrap(), task);

    let untouched = desk.toggle_folder_note_pin(folder, task.id).unwrap();
    assert_eq!(untouched, task);
}

#[test]
fn folder_crud_and_detail_view() {
    let mut desk = sample_desk();

    assert!(desk.add_folder(FolderDraft::new("  ", "blank name")).is_none());
    let folder = desk.add_folder(FolderDraft::new("Reading", "")).unwrap();
    assert_eq!(desk.folders()[0].folder.id, folder.id);
    assert_eq!(desk.folders()[0].item_count, 0);

    let renamed = desk
        .update_folder(
            folder.id,
            FolderPatch {
                name: Some("Reading list".to_string()),
                ..FolderPatch::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Reading list");

    desk.add_folder_item(folder.id, FolderItemDraft::note("SICP", "chapter 1"))
        .unwrap();
    let summary = desk.open_folder(folder.id).unwrap();
    assert_eq!(summary.item_count, 1);
    assert_eq!(desk.screen(), Screen::Desk(Section::FolderDetail(folder.id)));

    assert!(desk.remove_folder(folder.id));
    assert_eq!(desk.screen(), Screen::Desk(Section::Folders));
    assert!(desk.folder_items(folder.id).is_empty());
    assert!(desk.open_folder(folder.id).is_none());
    assert!(!desk.remove_folder(folder.id));
}
