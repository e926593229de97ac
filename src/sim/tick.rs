//! Fixed timestep simulation tick
//!
//! Advances one level by a single step: the get-ready gate, the cannon,
//! projectiles and their hits, wave movement and the alien fire schedule.

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, projectile_box, strike_bunkers};
use super::mystery::mystery_points;
use super::sequence::{DEFAULT_INITIAL_DELAY, SequenceSignal};
use super::state::{GameEvent, GameState, LevelState, POINTS_POPUP_TIME, PanelText, PointsPopup};
use crate::consts::*;
use crate::session::{MusicTrack, Session};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1]
    pub axis: f32,
    /// Fire button held
    pub fire: bool,
    /// Fire button went down this tick (continues past the get-ready panel)
    pub fire_pressed: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the level by one fixed timestep
pub fn tick(state: &mut GameState, session: &mut Session, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.level_state {
            LevelState::Playing => {
                state.set_level_state(LevelState::Paused);
                return;
            }
            LevelState::Paused => state.set_level_state(LevelState::Playing),
            _ => {}
        }
    }

    if state.level_state == LevelState::Paused {
        return;
    }

    state.time_ticks += 1;

    update_points_popup(state, dt);
    advance_sequence(state, session, input, dt);

    // Projectiles keep flying in every state but only hit things while playing
    state.alien_projectiles.integrate(dt);
    state
        .alien_projectiles
        .retire_outside(ALIEN_PROJECTILE_FLOOR, f32::MAX);
    state.cannon_projectile.integrate(dt);
    state
        .cannon_projectile
        .retire_outside(f32::MIN, CANNON_PROJECTILE_CEILING);

    if state.mystery.integrate(dt) {
        state.push_event(GameEvent::MysteryEscaped);
    }

    if !state.is_playing() {
        return;
    }

    update_cannon(state, input, dt);
    resolve_cannon_shot(state, session);
    resolve_alien_shots(state, session);

    // A hit may have ended play this tick
    if !state.is_playing() {
        return;
    }

    if state.wave.is_cleared() {
        level_cleared(state, session);
        return;
    }

    state.mystery.accumulate(dt);
    if state.wave.advance_counter() {
        wave_step(state, session);
    }
}

fn update_points_popup(state: &mut GameState, dt: f32) {
    if let Some(popup) = &mut state.points_popup {
        popup.remaining -= dt;
        if popup.remaining <= 0.0 {
            state.points_popup = None;
        }
    }
}

fn advance_sequence(state: &mut GameState, session: &mut Session, input: &TickInput, dt: f32) {
    let game_over = state.level_state == LevelState::GameOver;
    match state.sequence.advance(dt, input.fire_pressed) {
        Some(SequenceSignal::PanelShowing) if game_over => {
            session.play_music(MusicTrack::GameOver, 4.0);
        }
        Some(SequenceSignal::Confirmed) if game_over => {
            // The panel stays up while the session moves to the next scene
            state.sequence.halt();
            session.game_over();
        }
        Some(SequenceSignal::Finished) => {
            state.cannon.reset();
            state.set_level_state(LevelState::Playing);
        }
        _ => {}
    }
}

fn update_cannon(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.cannon.alive {
        return;
    }
    state.cannon.steer(input.axis, dt);

    if input.fire && state.cannon.fire_ready() {
        let pos = state.cannon.pos;
        if state
            .cannon_projectile
            .fire(pos, Vec2::new(0.0, PROJECTILE_SPEED), 1.0)
            .is_some()
        {
            state.cannon.mark_fired();
            state.push_event(GameEvent::CannonFired { pos });
        }
    }
}

fn resolve_cannon_shot(state: &mut GameState, session: &mut Session) {
    let Some((slot, pos)) = state.cannon_projectile.active().next().map(|(i, p)| (i, p.pos)) else {
        return;
    };
    let hitbox = projectile_box(pos);

    let hit = state
        .wave
        .live_positions()
        .find(|(_, at)| Aabb::new(*at, INVADER_HALF_EXTENTS).overlaps(&hitbox));
    if let Some((index, at)) = hit {
        state.cannon_projectile.deactivate(slot);
        if let Some(points) = state.wave.kill(index) {
            session.increase_score(points);
            state.push_event(GameEvent::InvaderKilled {
                index,
                points,
                pos: at,
            });
        }
        return;
    }

    if state.mystery.active
        && Aabb::new(state.mystery.pos, MYSTERY_HALF_EXTENTS).overlaps(&hitbox)
    {
        state.cannon_projectile.deactivate(slot);
        let at = state.mystery.pos;
        let points = mystery_points(at.x);
        state.mystery.despawn();
        session.increase_score(points);
        log::debug!("Mystery invader hit at x={:.1} for {} points", at.x, points);
        state.points_popup = Some(PointsPopup {
            pos: at,
            points,
            remaining: POINTS_POPUP_TIME,
        });
        state.push_event(GameEvent::MysteryKilled { points, pos: at });
        return;
    }

    if let Some(strike) = strike_bunkers(&state.bunkers, &hitbox) {
        state.cannon_projectile.deactivate(slot);
        let radius = state
            .rng()
            .random_range(CANNON_BLAST_MIN..CANNON_BLAST_MAX);
        let bunker = &mut state.bunkers[strike.bunker];
        bunker.bricks[strike.brick].alive = false;
        let bricks = 1 + bunker.blast(pos, radius);
        state.push_event(GameEvent::BunkerHit { pos, bricks });
    }
}

fn resolve_alien_shots(state: &mut GameState, session: &mut Session) {
    let shots: Vec<(usize, Vec2, f32)> = state
        .alien_projectiles
        .active()
        .map(|(i, p)| (i, p.pos, p.size_multiplier))
        .collect();

    for (slot, pos, size) in shots {
        let hitbox = projectile_box(pos);

        if let Some(strike) = strike_bunkers(&state.bunkers, &hitbox) {
            state.alien_projectiles.deactivate(slot);
            // Mystery bombs blow bigger holes
            let radius = state
                .rng()
                .random_range(ALIEN_BLAST_MIN..ALIEN_BLAST_MAX * size.max(1.0));
            let bunker = &mut state.bunkers[strike.bunker];
            bunker.bricks[strike.brick].alive = false;
            let bricks = 1 + bunker.blast(pos, radius);
            state.push_event(GameEvent::BunkerHit { pos, bricks });
            continue;
        }

        if state.cannon.alive && state.cannon.hitbox().overlaps(&hitbox) {
            state.alien_projectiles.deactivate(slot);
            player_hit(state, session, pos);
            return;
        }
    }
}

/// The cannon was destroyed: lose a life and show the panel
fn player_hit(state: &mut GameState, session: &mut Session, pos: Vec2) {
    if !state.is_playing() {
        return;
    }

    state.cannon.alive = false;
    let next = if session.lives() > 1 {
        LevelState::NextLife
    } else {
        LevelState::GameOver
    };
    state.set_level_state(next);

    // The mystery invader leaves without awarding anything
    state.mystery.despawn();
    state.warning = false;

    let lives = session.decrement_lives();
    log::info!("Player hit, {} lives remaining", lives);
    state.panel = match next {
        LevelState::NextLife => PanelText::lives_remaining("Get Ready", lives),
        _ => PanelText::new(
            "Game Over",
            "You have failed Earthling\nPress Space to Continue",
        ),
    };

    state.push_event(GameEvent::PlayerHit { pos });
    state.sequence.start(DEFAULT_INITIAL_DELAY);
}

fn level_cleared(state: &mut GameState, session: &mut Session) {
    state.mystery.despawn();
    state.warning = false;
    state.set_level_state(LevelState::GetReady);
    state.push_event(GameEvent::LevelCleared);
    session.level_complete();
}

fn invaders_landed(state: &mut GameState) {
    log::info!("Invaders landed");
    state.set_level_state(LevelState::GameOver);
    state.mystery.despawn();
    state.warning = false;
    state.panel = PanelText::new(
        "Game Over",
        "The Invaders Have Landed\nPress Space to Continue",
    );
    state.push_event(GameEvent::InvadersLanded);
    state.sequence.start(DEFAULT_INITIAL_DELAY);
}

/// One wave step plus everything that happens on it
fn wave_step(state: &mut GameState, session: &mut Session) {
    let kind = state.wave.step();
    state.push_event(GameEvent::WaveStep(kind));

    let Some(lowest) = state.wave.lowest_altitude() else {
        return;
    };
    if lowest < LANDING_ALTITUDE {
        invaders_landed(state);
        return;
    }

    if lowest <= WARNING_ALTITUDE {
        state.warning = true;
        session.play_music(MusicTrack::Warning, 1.0);
    } else {
        state.warning = false;
        session.stop_music(1.0);
    }

    alien_fire_roll(state);
    mystery_roll(state);
}

fn alien_pool_full(state: &GameState) -> bool {
    !state.alien_projectiles.has_free_slot()
}

/// Maybe fire from the lowest invader of a random non-empty column
fn alien_fire_roll(state: &mut GameState) {
    if alien_pool_full(state) {
        return;
    }
    if state.rng().random_range(0..100) >= state.fire_chance {
        return;
    }

    let columns = state.wave.non_empty_columns();
    if columns.is_empty() {
        return;
    }
    let column = columns[state.rng().random_range(0..columns.len())];
    let Some(index) = state.wave.lowest_in_column(column) else {
        return;
    };

    let pos = state.wave.position_of(index);
    if state
        .alien_projectiles
        .fire(pos, Vec2::new(0.0, -PROJECTILE_SPEED), 1.0)
        .is_some()
    {
        state.push_event(GameEvent::AlienFired {
            pos,
            mystery: false,
        });
    }
}

/// Spawn the mystery invader, or let it drop a bomb if already flying
fn mystery_roll(state: &mut GameState) {
    if !state.mystery.active {
        if state.mystery.spawn_timer() > MYSTERY_SPAWN_GATE {
            let roll = state.rng().random_range(0..100);
            if state.mystery.should_spawn(roll, state.mystery_chance) {
                state.mystery.spawn();
                log::debug!("Mystery invader spawned");
                state.push_event(GameEvent::MysterySpawned);
            }
        }
        return;
    }

    if alien_pool_full(state) {
        return;
    }
    if state.rng().random_range(0..100) < state.fire_chance.saturating_mul(2) {
        let pos = state.mystery.pos;
        if state
            .alien_projectiles
            .fire(pos, Vec2::new(0.0, -PROJECTILE_SPEED), MYSTERY_BOMB_SIZE)
            .is_some()
        {
            state.push_event(GameEvent::AlienFired { pos, mystery: true });
        }
    }
}
