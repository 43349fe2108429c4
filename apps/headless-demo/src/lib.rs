pub mod game;

use canvasroot::{CanvasRoot, CanvasSettings, MountError, PixelSurface};
use game::{scene, GameState};
use web_time::{Duration, Instant};

/// Plays a scripted round: clicks the target every second until time runs out.
pub fn run_scripted_round(seed: u32, settings: CanvasSettings) -> Result<GameState, MountError> {
    let game = GameState::shared(seed);
    let mut root = CanvasRoot::mount(&scene(&game), PixelSurface::new(0, 0), settings)?;
    let mut now = Instant::now();

    loop {
        let target = game.borrow().target_center();
        let hit = root.click(target, now);
        log::debug!("clicked ({:.0}, {:.0}) -> {hit:?}", target.x, target.y);

        now += Duration::from_secs(1);
        root.run_due_timers(now);
        game.borrow_mut().tick();
        root.update(&scene(&game));

        if game.borrow().game_over {
            break;
        }
    }

    let (width, height) = root.viewport().physical_size();
    log::info!(
        "round finished on a {width}x{height} buffer, {} pixels painted",
        root.surface().painted_pixels()
    );
    let state = game.borrow().clone();
    root.unmount();
    Ok(state)
}

/// Shared entry point for the binary.
pub fn entry_point() -> Result<(), MountError> {
    #[cfg(not(target_arch = "wasm32"))]
    let _ = env_logger::try_init();

    let settings = CanvasSettings::from_env().with_size(500.0, 600.0);
    let state = run_scripted_round(0x5eed, settings)?;
    log::info!("final score {} after {}s", state.score, game::ROUND_SECONDS);
    println!("Final score: {}", state.score);
    Ok(())
}

#[cfg(test)]
#[path = "tests/game_tests.rs"]
mod tests;
