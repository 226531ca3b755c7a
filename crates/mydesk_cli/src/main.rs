//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mydesk_core` linkage.
//! - Keep output deterministic for quick local sanity checks.
//! - Honor `MYDESK_*` overrides, including file logging.

use mydesk_core::{init_from_config, Desk, DeskConfig, MemoryStorage};

fn main() {
    println!("mydesk_core ping={}", mydesk_core::ping());
    println!("mydesk_core version={}", mydesk_core::core_version());

    let config = match DeskConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("mydesk_core config rejected: {err}");
            std::process::exit(2);
        }
    };
    match init_from_config(&config) {
        Ok(true) => println!("mydesk_core logging level={}", config.log_level),
        Ok(false) => {}
        Err(err) => eprintln!("mydesk_core logging disabled: {err}"),
    }

    // Session storage stays in memory; nothing is persisted.
    match Desk::open(MemoryStorage::new(), &config) {
        Ok(desk) => {
            let summary = desk.dashboard();
            println!(
                "mydesk_core sample notes={} links={} pending_tasks={} folders={}",
                summary.note_count,
                summary.link_count,
                summary.pending_task_count,
                summary.folder_count
            );
        }
        Err(err) => {
            eprintln!("mydesk_core sample desk failed: {err}");
            std::process::exit(1);
        }
    }
}
