//! CD Player
//!
//! This example drives a simulated CD player through a typical session.
//!
//! Key concepts:
//! - Unit kinds for states and events, a data-carrying event for disc detection
//! - One transition table declared in row order
//! - Handlers writing to the console
//! - First-match dispatch, so the drawer toggle does not chain
//!
//! Run with: RUST_LOG=switchyard=trace cargo run --example cd_player
//!
//! ```text
//!                        * Initial
//!                        |
//!       open_close    ___v___
//!      .------------>| Empty |  cd_detected
//!      | .-----------|_______|--------------.
//!      | |open_close                        |
//!    __|_v_                             ____v____
//!   | Open |        open_close         | Stopped |<-. stop
//!   |______|<--------------------------|_________|--'
//!      ^ ^                                  ^ ^ |
//!      | |   open_close    ________     stop| | |
//!      | '----------------| Paused |--------' | |
//!      |                  |________|          | |
//!      |                 pause ^ | end_pause  | |play
//!      |                       | v_________   | |
//!      |   open_close          '-| Playing |--' |
//!      '-------------------------|_________|<---'
//! ```

use switchyard::{impl_kind, kinds, DispatchPolicy, StateMachineBuilder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

kinds! {
    // States
    struct Empty;
    struct Open;
    struct Stopped;
    struct Paused;
    struct Playing;

    // Events
    struct Play;
    struct EndPause;
    struct Stop;
    struct Pause;
    struct OpenClose;
}

#[derive(Debug)]
enum DiskType {
    Cd,
    #[allow(dead_code)]
    Dvd,
}

struct CdDetected {
    name: String,
    disk_type: DiskType,
}

impl_kind!(CdDetected);

fn open_drawer(_: &OpenClose, _: &mut ()) {
    println!("Drawer opened.");
}

fn close_drawer(_: &OpenClose, _: &mut ()) {
    println!("Drawer closed.");
}

fn store_cd_info(cd: &CdDetected, _: &mut ()) {
    println!("Cd detected! Name: {} ({:?})", cd.name, cd.disk_type);
}

fn start_playback(_: &Play, _: &mut ()) {
    println!("Playback started!");
}

fn pause_playback(_: &Pause, _: &mut ()) {
    println!("Playback paused.");
}

fn resume_playback(_: &EndPause, _: &mut ()) {
    println!("Playback resumed!");
}

fn stop_playback(_: &Stop, _: &mut ()) {
    println!("Playback stopped!");
}

fn stop_and_open(_: &OpenClose, _: &mut ()) {
    println!("Playback stopped! Drawer is opening...");
}

fn stopped_again(_: &Stop, _: &mut ()) {
    println!("Playback already stopped.");
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== CD Player ===\n");

    let mut player = StateMachineBuilder::<()>::new()
        .initial::<Empty>()
        .dispatch_policy(DispatchPolicy::FirstMatch)
        .transition::<Stopped, Play, Playing>(start_playback)
        .transition::<Stopped, OpenClose, Open>(open_drawer)
        .transition::<Stopped, Stop, Stopped>(stopped_again)
        .transition::<Open, OpenClose, Empty>(close_drawer)
        .transition::<Empty, OpenClose, Open>(open_drawer)
        .transition::<Empty, CdDetected, Stopped>(store_cd_info)
        .transition::<Empty, CdDetected, Playing>(store_cd_info)
        .transition::<Playing, Stop, Stopped>(stop_playback)
        .transition::<Playing, Pause, Paused>(pause_playback)
        .transition::<Playing, OpenClose, Open>(stop_and_open)
        .transition::<Paused, EndPause, Playing>(resume_playback)
        .transition::<Paused, Stop, Stopped>(stop_playback)
        .transition::<Paused, OpenClose, Open>(stop_and_open)
        .build()
        .expect("initial state is set");

    println!("Transition table:\n{}", player.table());

    player.start();
    player.process_event(&OpenClose);
    player.process_event(&OpenClose);
    player.process_event(&CdDetected {
        name: "Bee Gees Spirits Having Flown".to_string(),
        disk_type: DiskType::Cd,
    });
    player.process_event(&Play);
    player.process_event(&Pause);
    player.process_event(&Stop);
    player.process_event(&Stop);
    player.stop();

    println!("\nFinal state: {}", player.current_state());
    println!("\n=== Example Complete ===");
}
