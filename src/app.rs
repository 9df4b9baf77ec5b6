use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::core::{
    config::{ConfigManager, Settings},
    coordinator::Coordinator,
    model::{CloseControl, Element},
    page::Page,
};

/// Commands the hosting environment can feed into the running loop.
pub enum LoopCommand {
    /// A click on the close control of the alert with this page handle.
    Click(usize),
}

/// Drive a page's dismissal loop to completion: initialize the dismisser,
/// then poll at the configured cadence until every timer has fired,
/// handling click commands between ticks.
pub async fn drive_page(
    page: Page,
    settings: &Settings,
    mut rx: mpsc::Receiver<LoopCommand>,
) -> Coordinator {
    let mut coordinator = Coordinator::new(page, settings.alert_class.clone());
    let found = coordinator.initialize();
    println!("Dismissal loop started. Watching {} alerts.", found.len());

    loop {
        // Check for commands from the environment
        while let Ok(cmd) = rx.try_recv() {
            match cmd {
                LoopCommand::Click(handle) => {
                    if let Some(event) = coordinator.click(handle) {
                        log::info!(
                            "Closed {} at {:?} (manual)",
                            event.id.map_or_else(|| format!("#{}", event.element), |id| id.to_string()),
                            event.timestamp
                        );
                    }
                }
            }
        }

        let output = coordinator.tick();
        for event in output.dismissed {
            log::info!(
                "Hid {} at {:?} (timer)",
                event.id.map_or_else(|| format!("#{}", event.element), |id| id.to_string()),
                event.timestamp
            );
        }

        if output.idle {
            break;
        }

        tokio::time::sleep(Duration::from_millis(settings.tick_interval_ms)).await;
    }

    coordinator
}

/// A small rendered page in the shape the dismisser expects: two alerts,
/// one with a close control targeting itself, one without.
fn demo_page(settings: &Settings) -> Page {
    let mut page = Page::new();
    page.push(
        Element::new()
            .with_class(settings.alert_class.clone())
            .with_id("welcome")
            .with_close_control(CloseControl::targeting("welcome")),
    );
    page.push(
        Element::new()
            .with_class(settings.alert_class.clone())
            .with_id("maintenance-notice"),
    );
    page
}

pub fn run() {
    env_logger::init();

    let config_dir = std::env::var_os("ALERT_DISMISSER_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config_manager = ConfigManager::new(config_dir);
    let settings = config_manager.load();

    let runtime = tokio::runtime::Runtime::new().expect("error while starting tokio runtime");
    runtime.block_on(async move {
        let (tx, rx) = mpsc::channel(32);

        // Simulate a user closing the first alert shortly after load
        let clicker = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            let _ = tx.send(LoopCommand::Click(0)).await;
        });

        let coordinator = drive_page(demo_page(&settings), &settings, rx).await;
        let _ = clicker.await;

        let hidden = (0..coordinator.page().len())
            .filter(|&handle| coordinator.page().is_hidden(handle))
            .count();
        println!("Dismissal loop finished. {} elements hidden.", hidden);
    });
}
