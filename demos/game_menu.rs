//! Game Menu
//!
//! This example walks a game through its menu screens.
//!
//! Key concepts:
//! - The current screen label is caller-owned state in the environment
//! - Every handler updates the label for the state it enters
//! - Transition history shows the path taken
//!
//! Run with: cargo run --example game_menu
//!
//! ```text
//!                 * Initial
//!                 |
//!              ___v______  GoToMainMenu
//!             | MainMenu |<------------.
//!             |__________|             |
//!       LoadGame  |                    |
//!              ___v_____               |
//!             | Loading |              |
//!             |_________|              |
//!       StartGame |                    |
//!              ___v__   PauseGame   ___|_______
//!             | Game |------------>| PauseMenu |
//!             |______|<------------|___________|
//!                       ResumeGame
//! ```

use switchyard::{kinds, HistoryPolicy, StateMachineBuilder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

kinds! {
    // States
    struct MainMenu;
    struct Loading;
    struct Game;
    struct PauseMenu;

    // Events
    struct LoadGame;
    struct StartGame;
    struct PauseGame;
    struct ResumeGame;
    struct GoToMainMenu;
}

struct Screen(&'static str);

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Game Menu ===\n");

    let mut menu = StateMachineBuilder::with_env(Screen("MENU_SCREEN"))
        .initial::<MainMenu>()
        .history(HistoryPolicy::Unbounded)
        .transition::<MainMenu, LoadGame, Loading>(|_, screen| {
            println!("Loading in Game resources...");
            screen.0 = "LOADING_SCREEN";
        })
        .transition::<Loading, StartGame, Game>(|_, screen| {
            println!("Starting the Game...");
            screen.0 = "MAIN_GAME_SCREEN";
        })
        .transition::<Game, PauseGame, PauseMenu>(|_, screen| {
            println!("Game is paused.");
            screen.0 = "PAUSE_SCREEN";
        })
        .transition::<PauseMenu, ResumeGame, Game>(|_, screen| {
            println!("Game is resumed.");
            screen.0 = "MAIN_GAME_SCREEN";
        })
        .transition::<PauseMenu, GoToMainMenu, MainMenu>(|_, screen| {
            println!("Returning to MainMenu...");
            screen.0 = "MENU_SCREEN";
        })
        .build()
        .expect("initial state is set");

    menu.start();
    println!("Current screen is: {}", menu.env().0);

    menu.process_event(&LoadGame);
    println!("Current screen is: {}", menu.env().0);
    menu.process_event(&StartGame);
    println!("Current screen is: {}", menu.env().0);
    menu.process_event(&PauseGame);
    println!("Current screen is: {}", menu.env().0);
    menu.process_event(&ResumeGame);
    println!("Current screen is: {}", menu.env().0);
    menu.process_event(&PauseGame);
    println!("Current screen is: {}", menu.env().0);
    menu.process_event(&GoToMainMenu);
    println!("Current screen is: {}", menu.env().0);
    menu.stop();

    if let Some(history) = menu.history() {
        let path: Vec<&str> = history.path().into_iter().map(|id| id.name()).collect();
        println!("\nPath: {}", path.join(" -> "));
    }

    println!("\n=== Example Complete ===");
}
