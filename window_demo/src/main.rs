//! Window demo application
//!
//! Drives a main menu, a game screen and a quit confirmation through a
//! scripted event pump. Run with `RUST_LOG=trace` and `trace_events = true`
//! in `window_demo.toml` to see every dispatch.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;
use window_core::foundation::logging;
use window_core::prelude::*;
use window_core::ConfigError;

const CONFIG_PATH: &str = "window_demo.toml";

/// Host event: the player confirmed the prompt in front of them
const CONFIRM: EventType = EventType::User(0);

#[derive(Error, Debug)]
enum DemoError {
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn describe(wm: &WindowManager, window: WindowId) -> String {
    wm.surface(window)
        .map_or_else(|| "<gone>".to_string(), |surface| format!("{:?}", surface.bounds()))
}

/// Main menu; any key starts a game
struct MainMenu {
    screen: Canvas,
}

impl WindowHandler for MainMenu {
    fn handle_event(
        &self,
        wm: &mut WindowManager,
        window: WindowId,
        event: &Event,
        _data: Option<&UserData>,
    ) -> bool {
        match event.event_type {
            EventType::WindowActivated => log::info!("Menu active"),
            EventType::WindowDeactivated => log::info!("Menu inactive"),
            EventType::WindowDraw => log::debug!("Drawing menu at {}", describe(wm, window)),
            EventType::KeyCommand => {
                let game = GameScreen {
                    screen: self.screen.clone(),
                    quit_confirmed: Rc::new(Cell::new(false)),
                };
                if let Err(e) = wm.create(&self.screen, Rect::new(0, 0, 640, 480), Rc::new(game), None) {
                    log::error!("Failed to start game: {}", e);
                }
            }
            _ => {}
        }
        false
    }

    fn window_closed(&self, _wm: &mut WindowManager, _window: ClosedWindow) {
        log::info!("Menu closed");
    }
}

/// Game screen; asks for confirmation before it lets itself close
struct GameScreen {
    screen: Canvas,
    quit_confirmed: Rc<Cell<bool>>,
}

impl WindowHandler for GameScreen {
    fn handle_event(
        &self,
        wm: &mut WindowManager,
        window: WindowId,
        event: &Event,
        _data: Option<&UserData>,
    ) -> bool {
        match event.event_type {
            EventType::WindowActivated => log::info!("Game resumed"),
            EventType::WindowDeactivated => log::info!("Game paused"),
            EventType::WindowDraw => log::debug!("Drawing game at {}", describe(wm, window)),
            EventType::WindowClose if !self.quit_confirmed.get() => {
                let dialog = QuitDialog {
                    quit_confirmed: Rc::clone(&self.quit_confirmed),
                };
                let game: UserData = Rc::new(window);
                match wm.create(&self.screen, Rect::new(220, 190, 200, 100), Rc::new(dialog), Some(game)) {
                    Ok(_) => return true,
                    Err(e) => log::error!("Could not ask for confirmation, quitting anyway: {}", e),
                }
            }
            _ => {}
        }
        false
    }

    fn window_closed(&self, _wm: &mut WindowManager, _window: ClosedWindow) {
        log::info!("Game closed");
    }
}

/// "Really quit?" prompt; user data is the game window it guards
struct QuitDialog {
    quit_confirmed: Rc<Cell<bool>>,
}

impl WindowHandler for QuitDialog {
    fn handle_event(
        &self,
        wm: &mut WindowManager,
        window: WindowId,
        event: &Event,
        data: Option<&UserData>,
    ) -> bool {
        match event.event_type {
            EventType::WindowDraw => log::debug!("Drawing quit prompt at {}", describe(wm, window)),
            CONFIRM => {
                self.quit_confirmed.set(true);
                let game = data.and_then(|data| data.downcast_ref::<WindowId>()).copied();

                if let Err(e) = wm.close(window) {
                    log::error!("Quit prompt failed to close: {}", e);
                }
                if let Some(game) = game {
                    match wm.close(game) {
                        Ok(true) => {}
                        Ok(false) => log::warn!("Game refused to close after confirmation"),
                        Err(e) => log::error!("Game window vanished: {}", e),
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn window_closed(&self, _wm: &mut WindowManager, _window: ClosedWindow) {
        log::info!("Quit prompt dismissed");
    }
}

/// One frame of the pump: draw every visible window back to front, then idle the active one
fn pump_frame(wm: &mut WindowManager) -> Result<(), WindowError> {
    let windows: Vec<WindowId> = wm.iter().collect();
    for window in windows {
        // Drawing can close windows further up the chain
        if wm.contains(window) && wm.is_visible(window)? {
            wm.send_event(window, &Event::new(EventType::WindowDraw))?;
        }
    }

    if let Some(front) = wm.get_front() {
        wm.send_event(front, &Event::new(EventType::Idle))?;
    }
    Ok(())
}

fn send_to_front(wm: &mut WindowManager, event_type: EventType) -> Result<(), WindowError> {
    match wm.get_front() {
        Some(front) => {
            wm.send_event(front, &Event::new(event_type))?;
        }
        None => log::warn!("No active window for {:?}", event_type),
    }
    Ok(())
}

fn run(config: WindowManagerConfig) -> Result<(), DemoError> {
    let screen = Canvas::new(640, 480);
    let mut wm = WindowManager::with_config(config);

    let menu = wm.create(
        &screen,
        Rect::new(0, 0, 640, 480),
        Rc::new(MainMenu { screen: screen.clone() }),
        None,
    )?;
    pump_frame(&mut wm)?;

    log::info!("Starting a game");
    send_to_front(&mut wm, EventType::KeyCommand)?;
    pump_frame(&mut wm)?;

    log::info!("Trying to quit");
    if let Some(game) = wm.front_raw().filter(|&front| front != menu) {
        let closed = wm.close(game)?;
        log::info!("Game closed on first request: {}", closed);
    }
    pump_frame(&mut wm)?;

    log::info!("Confirming quit");
    send_to_front(&mut wm, CONFIRM)?;
    pump_frame(&mut wm)?;

    log::info!("Hiding and showing the menu");
    wm.set_visible(menu, false)?;
    log::info!("Active window while hidden: {:?}", wm.get_front());
    wm.set_visible(menu, true)?;
    pump_frame(&mut wm)?;

    wm.shutdown();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting window demo");
    let config = WindowManagerConfig::load_or_default(CONFIG_PATH).map_err(DemoError::from)?;
    run(config)?;
    log::info!("Window demo finished");

    Ok(())
}
