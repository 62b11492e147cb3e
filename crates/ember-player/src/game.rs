//! The demo game: title screen, start banner, in-game movement and shooting.
//!
//! Three layered states drive the session. "Title" waits for space, then
//! swaps itself for "StartGame" plus "InGame" and arms a one-shot timer that
//! drops the banner a few seconds in, leaving "InGame" alone. The player
//! entity steers with the arrow keys, slows to a focused crawl while shift
//! is held, and fires one bullet per discrete Z press.

use crate::config::PlayerConfig;
use ember_core::{Color, TextAlign};
use ember_runtime::{EntitySpec, FrameScheduler, HeadlessStage, HookTable, KeyCode, Stage};

/// Ticks the "StartGame" banner stays up before its timer removes it.
const START_BANNER_TICKS: u32 = 180;
/// Player speed in playfield units per tick.
const PLAYER_SPEED: f64 = 3.0;
/// Velocity multiplier while shift is held.
const FOCUS_FACTOR: f64 = 0.4;
/// Upward bullet speed in playfield units per tick.
const BULLET_SPEED: f64 = 4.0;

/// Build a scheduler on a headless stage and install the demo game.
pub fn new_scheduler(config: &PlayerConfig) -> FrameScheduler<HeadlessStage> {
    let stage = HeadlessStage::with_dimensions(
        config.seed,
        (config.playfield.width, config.playfield.height),
        (config.view.width, config.view.height),
    );
    let mut scheduler = FrameScheduler::new(stage);
    install(&mut scheduler);
    scheduler.set_state("Title");
    scheduler
}

/// Register all state and entity hooks for the demo game.
pub fn install<S: Stage>(scheduler: &mut FrameScheduler<S>) {
    let hooks = scheduler.hooks_mut();
    install_title(hooks);
    install_start_banner(hooks);
    install_in_game(hooks);
    install_player(hooks);
    install_bullet(hooks);
}

fn install_title(hooks: &mut HookTable) {
    hooks.on_enter("Title", |frame| {
        frame.remove_entities(None, 0);
    });

    hooks.on_update("Title", |frame| {
        if frame.key_down(KeyCode::Space) {
            // One transition per discrete press.
            frame.consume_key(KeyCode::Space);
            frame.set_state("StartGame");
            frame.add_state("InGame");
            // Bound to StartGame: if the state is left early for any other
            // reason, the alarm must not fire at the next StartGame.
            frame.schedule_timer(START_BANNER_TICKS, true, "StartGame", |alarm_frame| {
                alarm_frame.remove_state("StartGame");
            });
        }
    });

    hooks.on_draw("Title", |_view, stage| {
        let x = stage.view_width() / 2.0;
        stage.draw_text(
            "Title screen. Press space to start",
            x,
            90.0,
            TextAlign::Center,
            Color::WHITE,
        );
    });
}

fn install_start_banner(hooks: &mut HookTable) {
    hooks.on_enter("StartGame", |frame| {
        let width = frame.stage().playfield_width() as i32;
        let height = frame.stage().playfield_height() as i32;
        let x = frame.random_int(0, width) as f64;
        let y = frame.random_int(0, height) as f64;
        frame.spawn(EntitySpec::new("player").collision(1).at(x, y));
    });

    hooks.on_draw("StartGame", |_view, stage| {
        let x = stage.playfield_width() / 2.0;
        stage.draw_text("Get ready!", x, 90.0, TextAlign::Center, Color::WHITE);
    });
}

fn install_in_game(hooks: &mut HookTable) {
    hooks.on_update("InGame", |frame| {
        // Pause movement while escape is held; timers and draws keep going.
        if frame.key_down(KeyCode::Escape) {
            frame.skip_movement();
        }
    });

    hooks.on_draw("InGame", |view, stage| {
        if let Some(player) = view.entity("player") {
            let shots = view
                .entities()
                .filter(|e| e.name().starts_with("bullet"))
                .count();
            let text = format!(
                "X:{:.0} , Y:{:.0} , shots:{}",
                player.pos.x, player.pos.y, shots
            );
            let x = stage.view_width() / 16.0;
            let y = stage.view_height() / 9.0;
            stage.draw_text(&text, x, y, TextAlign::Left, Color::YELLOW);
        }
    });
}

fn install_player(hooks: &mut HookTable) {
    hooks.on_move("player", |entity, frame| {
        entity.vel.x = if frame.key_down(KeyCode::ArrowLeft) {
            -PLAYER_SPEED
        } else if frame.key_down(KeyCode::ArrowRight) {
            PLAYER_SPEED
        } else {
            0.0
        };
        entity.vel.y = if frame.key_down(KeyCode::ArrowUp) {
            -PLAYER_SPEED
        } else if frame.key_down(KeyCode::ArrowDown) {
            PLAYER_SPEED
        } else {
            0.0
        };

        let focused =
            frame.key_down(KeyCode::ShiftLeft) || frame.key_down(KeyCode::ShiftRight);
        if focused {
            entity.scale_velocity(FOCUS_FACTOR);
        }

        if frame.is_active("InGame") && frame.key_down(KeyCode::KeyZ) {
            frame.consume_key(KeyCode::KeyZ);
            let (x, y) = (entity.pos.x, entity.pos.y);
            frame.spawn(
                EntitySpec::new("bullet")
                    .unique(true)
                    .collision(1)
                    .at(x, y)
                    .velocity(0.0, -BULLET_SPEED)
                    .expires_with("InGame"),
            );
        }
    });

    hooks.on_entity_draw("player", |entity, stage| {
        stage.draw_oval(entity.pos.x, entity.pos.y, 16.0, 16.0, true, Color::BLUE);
    });
}

fn install_bullet(hooks: &mut HookTable) {
    hooks.on_entity_draw("bullet", |entity, stage| {
        stage.draw_rect(entity.pos.x, entity.pos.y, 4.0, 8.0, true, Color::BLUE);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_session() -> FrameScheduler<HeadlessStage> {
        let mut sched = new_scheduler(&PlayerConfig::default());
        sched.tick(); // Title becomes active
        assert!(sched.is_active("Title"));

        sched.stage_mut().press_key(KeyCode::Space);
        sched.tick(); // Title update queues the transition
        sched.stage_mut().release_key(KeyCode::Space);
        sched.tick(); // StartGame + InGame commit; player spawns
        sched
    }

    #[test]
    fn space_moves_from_title_into_layered_game_states() {
        let sched = start_session();
        assert!(!sched.is_active("Title"));
        assert!(sched.is_active("StartGame"));
        assert!(sched.is_active("InGame"));
        assert!(sched.entities().contains("player"));
    }

    #[test]
    fn start_banner_drops_after_its_timer_leaving_in_game() {
        let mut sched = start_session();
        for _ in 0..(START_BANNER_TICKS as u64 + 5) {
            sched.tick();
        }
        assert!(!sched.is_active("StartGame"));
        assert!(sched.is_active("InGame"));
        assert!(sched.timers().is_empty());
        assert!(sched.entities().contains("player"));
    }

    #[test]
    fn arrow_keys_steer_and_shift_slows() {
        let mut sched = start_session();
        let x0 = sched.entities().get("player").unwrap().pos.x;

        sched.stage_mut().press_key(KeyCode::ArrowRight);
        for _ in 0..10 {
            sched.tick();
        }
        let x1 = sched.entities().get("player").unwrap().pos.x;
        assert!((x1 - x0 - 10.0 * PLAYER_SPEED).abs() < 1e-9);

        sched.stage_mut().press_key(KeyCode::ShiftLeft);
        sched.tick();
        let x2 = sched.entities().get("player").unwrap().pos.x;
        assert!((x2 - x1 - PLAYER_SPEED * FOCUS_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn z_fires_one_bullet_per_discrete_press() {
        let mut sched = start_session();

        sched.stage_mut().press_key(KeyCode::KeyZ);
        sched.tick();
        sched.tick(); // still held: consumed, no second bullet
        let bullets = sched
            .entities()
            .iter()
            .filter(|e| e.name().starts_with("bullet"))
            .count();
        assert_eq!(bullets, 1);

        sched.stage_mut().release_key(KeyCode::KeyZ);
        sched.stage_mut().press_key(KeyCode::KeyZ);
        sched.tick();
        let bullets = sched
            .entities()
            .iter()
            .filter(|e| e.name().starts_with("bullet"))
            .count();
        assert_eq!(bullets, 2);
    }

    #[test]
    fn bullets_travel_up_and_die_with_in_game() {
        let mut sched = start_session();

        sched.stage_mut().press_key(KeyCode::KeyZ);
        sched.tick();
        sched.stage_mut().release_key(KeyCode::KeyZ);

        let y0 = sched
            .entities()
            .iter()
            .find(|e| e.name().starts_with("bullet"))
            .unwrap()
            .pos
            .y;
        sched.tick();
        let y1 = sched
            .entities()
            .iter()
            .find(|e| e.name().starts_with("bullet"))
            .unwrap()
            .pos
            .y;
        assert!((y0 - y1 - BULLET_SPEED).abs() < 1e-9);

        sched.remove_state("InGame");
        sched.tick();
        assert!(!sched.entities().iter().any(|e| e.name().starts_with("bullet")));
    }

    #[test]
    fn escape_pauses_movement_but_hud_still_draws() {
        let mut sched = start_session();
        sched.stage_mut().press_key(KeyCode::ArrowRight);
        sched.tick();
        let x = sched.entities().get("player").unwrap().pos.x;

        sched.stage_mut().press_key(KeyCode::Escape);
        sched.stage_mut().drain_draw_calls();
        sched.tick();
        assert_eq!(sched.entities().get("player").unwrap().pos.x, x);
        assert!(!sched.stage().draw_calls().is_empty());
    }

    #[test]
    fn title_reentry_clears_the_playfield() {
        let mut sched = start_session();
        assert!(!sched.entities().is_empty());

        sched.set_state("Title");
        sched.tick();
        assert!(sched.is_active("Title"));
        assert!(sched.entities().is_empty());
    }
}
