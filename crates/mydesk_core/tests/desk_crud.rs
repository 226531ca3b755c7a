use mydesk_core::{
    Desk, DeskConfig, EntityId, LinkDraft, LinkPatch, MemoryStorage, NoteDraft, NotePatch,
    Priority, TaskDraft, TaskPatch,
};
use std::collections::HashSet;

fn empty_desk() -> Desk<MemoryStorage> {
    let config = DeskConfig {
        seed_sample_data: false,
        ..DeskConfig::default()
    };
    Desk::open(MemoryStorage::new(), &config).unwrap()
}

fn sample_desk() -> Desk<MemoryStorage> {
    Desk::open(MemoryStorage::new(), &DeskConfig::default()).unwrap()
}

#[test]
fn blank_required_fields_never_change_length() {
    let mut desk = sample_desk();

    assert!(desk.add_note(NoteDraft::new("", "body")).is_none());
    assert!(desk.add_note(NoteDraft::new("title", "   ")).is_none());
    assert!(desk.add_link(LinkDraft::new("GitHub", "")).is_none());
    assert!(desk.add_task(TaskDraft::new("")).is_none());

    assert_eq!(desk.store().notes().len(), 3);
    assert_eq!(desk.store().links().len(), 3);
    assert_eq!(desk.store().tasks().len(), 3);
}

#[test]
fn valid_adds_get_unique_ids_and_go_first() {
    let mut desk = empty_desk();
    let mut ids = HashSet::new();

    for index in 0..20 {
        let note = desk
            .add_note(NoteDraft::new(format!("note {index}"), "body"))
            .unwrap();
        assert!(ids.insert(note.id));
        assert_eq!(desk.store().notes().as_slice()[0].id, note.id);
    }
    assert_eq!(desk.store().notes().len(), 20);
}

#[test]
fn added_records_take_defaults() {
    let mut desk = empty_desk();

    let note = desk.add_note(NoteDraft::new("Heap", "sift down")).unwrap();
    assert_eq!(note.category, "General");
    assert!(!note.pinned);

    let link = desk
        .add_link(LinkDraft::new("Docs", "https://docs.rs"))
        .unwrap();
    assert_eq!(link.category, "General");
    assert_eq!(link.description, "");

    let task = desk.add_task(TaskDraft::new("Ship")).unwrap();
    assert_eq!(task.priority, Priority::Medium);
    assert!(!task.completed);
}

#[test]
fn remove_existing_and_unknown_ids() {
    let mut desk = sample_desk();
    let id = desk.store().links().as_slice()[1].id;

    assert!(desk.remove_link(id));
    assert_eq!(desk.store().links().len(), 2);
    assert!(desk.store().links().get(id).is_none());

    assert!(!desk.remove_link(id));
    assert!(!desk.remove_note(EntityId::nil()));
    assert!(!desk.remove_task(EntityId::nil()));
    assert_eq!(desk.store().links().len(), 2);
    assert_eq!(desk.store().notes().len(), 3);
}

#[test]
fn update_merges_fields_and_keeps_position() {
    let mut desk = sample_desk();
    let target = desk.store().notes().as_slice()[1].clone();

    let updated = desk
        .update_note(
            target.id,
            NotePatch {
                content: Some("FCFS, SJF, round robin".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, target.title);
    assert_eq!(updated.content, "FCFS, SJF, round robin");
    assert_eq!(desk.store().notes().as_slice()[1], updated);
}

#[test]
fn invalid_or_unknown_updates_are_silent_noops() {
    let mut desk = sample_desk();
    let before = desk.store().links().as_slice().to_vec();

    let blanked = desk.update_link(
        before[0].id,
        LinkPatch {
            url: Some(String::new()),
            ..LinkPatch::default()
        },
    );
    assert!(blanked.is_none());

    let unknown = desk.update_task(
        EntityId::nil(),
        TaskPatch {
            title: Some("ghost".to_string()),
            ..TaskPatch::default()
        },
    );
    assert!(unknown.is_none());
    assert_eq!(desk.store().links().as_slice(), before.as_slice());
}

#[test]
fn toggling_twice_restores_flags() {
    let mut desk = sample_desk();
    let note = desk.store().notes().as_slice()[0].clone();
    let task = desk.store().tasks().as_slice()[0].clone();

    let flipped = desk.toggle_note_pin(note.id).unwrap();
    assert_eq!(flipped.pinned, !note.pinned);
    assert_eq!(desk.toggle_note_pin(note.id).unwrap(), note);

    let done = desk.toggle_task(task.id).unwrap();
    assert_eq!(done.completed, !task.completed);
    assert_eq!(desk.toggle_task(task.id).unwrap(), task);

    assert!(desk.toggle_task(EntityId::nil()).is_none());
}

#[test]
fn dashboard_counts_follow_mutations() {
    let mut desk = sample_desk();
    let summary = desk.dashboard();
    assert_eq!(summary.note_count, 3);
    assert_eq!(summary.link_count, 3);
    assert_eq!(summary.pending_task_count, 2);
    assert_eq!(summary.folder_count, 3);

    let pending = desk
        .store()
        .tasks()
        .iter()
        .find(|task| !task.completed)
        .map(|task| task.id)
        .unwrap();
    desk.toggle_task(pending);
    desk.add_note(NoteDraft::new("CN - TCP", "three-way handshake"));

    let summary = desk.dashboard();
    assert_eq!(summary.note_count, 4);
    assert_eq!(summary.pending_task_count, 1);
    assert_eq!(summary.recent_notes[0].note.title, "CN - TCP");
    assert_eq!(summary.recent_notes.len(), 3);
}
