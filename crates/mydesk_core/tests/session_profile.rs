use mydesk_core::{
    open_sqlite_desk, AuthSurface, Desk, DeskConfig, LocalStorage, MemoryStorage, ProfilePatch,
    Screen, SessionError, SessionState, SqliteStorage, UserProfile, USER_STORAGE_KEY,
};
use serde_json::json;
use std::time::Duration;

fn file_config(dir: &tempfile::TempDir) -> DeskConfig {
    DeskConfig {
        storage_path: Some(dir.path().join("desk.db")),
        profile_save_delay: Duration::from_millis(1000),
        ..DeskConfig::default()
    }
}

#[test]
fn fresh_desk_starts_logged_out_on_login_surface() {
    let desk = Desk::open(MemoryStorage::new(), &DeskConfig::default()).unwrap();

    assert_eq!(desk.session().state(), &SessionState::LoggedOut);
    assert_eq!(desk.screen(), Screen::Auth(AuthSurface::Login));
}

#[test]
fn login_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);

    let mut desk = open_sqlite_desk(&config).unwrap();
    desk.sign_up("Alan Turing", "alan@example.com").unwrap();
    drop(desk);

    let reopened = open_sqlite_desk(&config).unwrap();
    let user = reopened.session().current_user().unwrap();
    assert_eq!(user.email, "alan@example.com");
    assert_eq!(user.initials(), "AT");
}

#[test]
fn delete_account_then_restore_is_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);

    let mut desk = open_sqlite_desk(&config).unwrap();
    desk.login(UserProfile::new("Alan", "alan@example.com"))
        .unwrap();
    desk.delete_account().unwrap();
    assert_eq!(desk.screen(), Screen::Auth(AuthSurface::Signup));
    assert_eq!(
        desk.session().storage().get_item(USER_STORAGE_KEY).unwrap(),
        None
    );
    drop(desk);

    let reopened = open_sqlite_desk(&config).unwrap();
    assert_eq!(reopened.session().state(), &SessionState::LoggedOut);
}

#[test]
fn logout_routes_to_login_surface() {
    let mut desk = Desk::open(MemoryStorage::new(), &DeskConfig::default()).unwrap();
    desk.login(UserProfile::new("Alan", "alan@example.com"))
        .unwrap();

    desk.logout().unwrap();
    assert_eq!(desk.screen(), Screen::Auth(AuthSurface::Login));
    assert!(!desk.session().is_logged_in());
}

#[test]
fn login_requires_email() {
    let mut desk = Desk::open(MemoryStorage::new(), &DeskConfig::default()).unwrap();
    let err = desk.login(UserProfile::new("Nobody", "  ")).unwrap_err();
    assert!(matches!(err, SessionError::MissingEmail));
    assert!(!desk.session().is_logged_in());
}

#[test]
fn corrupt_user_record_restores_logged_out() {
    let mut storage = MemoryStorage::new();
    storage.set_item(USER_STORAGE_KEY, "{not json").unwrap();

    let desk = Desk::open(storage, &DeskConfig::default()).unwrap();
    assert_eq!(desk.session().state(), &SessionState::LoggedOut);
}

#[tokio::test(start_paused = true)]
async fn update_profile_waits_then_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);
    let mut desk: Desk<SqliteStorage> = open_sqlite_desk(&config).unwrap();
    desk.login(UserProfile::new("Alan", "alan@example.com"))
        .unwrap();

    let started = tokio::time::Instant::now();
    let mut patch = ProfilePatch {
        bio: Some("Codebreaker".to_string()),
        ..ProfilePatch::default()
    };
    patch.extra.insert("theme".to_string(), json!("dark"));
    let updated = desk.update_profile(patch).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert_eq!(updated.bio, "Codebreaker");
    assert_eq!(updated.name, "Alan");

    let raw = desk
        .session()
        .storage()
        .get_item(USER_STORAGE_KEY)
        .unwrap()
        .unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["bio"], json!("Codebreaker"));
    assert_eq!(stored["theme"], json!("dark"));
    drop(desk);

    let reopened = open_sqlite_desk(&config).unwrap();
    assert_eq!(reopened.session().current_user(), Some(&updated));
}

#[tokio::test(start_paused = true)]
async fn update_profile_requires_session() {
    let mut desk = Desk::open(MemoryStorage::new(), &DeskConfig::default()).unwrap();
    let err = desk
        .update_profile(ProfilePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NotLoggedIn));
}
