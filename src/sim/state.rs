//! Game state and core simulation types
//!
//! `GameState` is the entity world: it exclusively owns the player and every
//! enemy, projectile, laser, particle and power-up of the current run.
//! Cross references between entities are by [`EntityId`] only.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::palette;
use crate::ticks_to_display_seconds;
use crate::tuning::Tuning;

/// Stable identifier of an entity within a run (never reused)
pub type EntityId = u32;

/// Salt separating the cosmetic RNG stream from the gameplay stream
const FX_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run; ticks are no-ops
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; ticks are no-ops until the next `start_run`
    GameOver,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Single fast aimed shot
    Scout,
    /// Three-way spread, ejects a Pilot on death
    Fighter,
    /// Sweeping laser beam
    Destroyer,
    /// Fighter escape pod, throws one bomb
    Pilot,
    /// Rushes the player, then crashes and drops a Paratrooper
    Kamikaze,
    /// Drifts down under a canopy, firing weak aimed shots
    Paratrooper,
}

/// Static per-kind stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub size: Vec2,
    pub hp: i32,
    pub score: u64,
    pub color: u32,
}

impl EnemyKind {
    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Scout => EnemyStats {
                size: Vec2::new(40.0, 30.0),
                hp: 20,
                score: 100,
                color: palette::NEON_YELLOW,
            },
            EnemyKind::Fighter => EnemyStats {
                size: Vec2::new(50.0, 40.0),
                hp: 40,
                score: 300,
                color: palette::NEON_PINK,
            },
            EnemyKind::Destroyer => EnemyStats {
                size: Vec2::new(80.0, 60.0),
                hp: 150,
                score: 1000,
                color: palette::DESTROYER_RED,
            },
            EnemyKind::Pilot => EnemyStats {
                size: Vec2::new(20.0, 20.0),
                hp: 1,
                score: 500,
                color: palette::WHITE,
            },
            EnemyKind::Kamikaze => EnemyStats {
                size: Vec2::new(40.0, 25.0),
                hp: 30,
                score: 200,
                color: palette::NEON_ORANGE,
            },
            EnemyKind::Paratrooper => EnemyStats {
                size: Vec2::new(20.0, 30.0),
                hp: 10,
                score: 150,
                color: palette::NEON_GREEN,
            },
        }
    }

    /// Ticks between attack rolls; the per-enemy offset is drawn from [0, period)
    pub const fn shoot_period(self) -> u32 {
        match self {
            EnemyKind::Paratrooper => 90,
            _ => 120,
        }
    }
}

/// Enemy lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Entering,
    Hovering,
    Attacking,
    Crashing,
    /// Pilot has thrown its bomb and is leaving the field
    Retreating,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub pos: Vec2,
    pub size: Vec2,
    /// Used by the physics-driven kinds (Kamikaze crash, Paratrooper)
    pub vel: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    /// Attack cadence phase so simultaneous spawns don't fire in lockstep
    pub shoot_offset: u32,
    /// Ticks spent in the current state
    pub state_ticks: u32,
    /// Visual spin while crashing (radians)
    pub rotation: f32,
    /// Hull colour for the renderer
    pub color: u32,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2, shoot_offset: u32) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            state: EnemyState::Entering,
            pos,
            size: stats.size,
            vel: Vec2::ZERO,
            hp: stats.hp,
            max_hp: stats.hp,
            shoot_offset,
            state_ticks: 0,
            rotation: 0.0,
            color: stats.color,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn set_state(&mut self, state: EnemyState) {
        if self.state != state {
            self.state = state;
            self.state_ticks = 0;
        }
    }

    /// Leave the playfield without being destroyed (no score)
    pub fn despawn(&mut self) {
        self.hp = 0;
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    /// Host wall-clock time of the last shot (ms)
    pub last_shot_ms: Option<f64>,
    pub invulnerable_ticks: u32,
    pub shield_ticks: u32,
    pub multishot_ticks: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, tuning.canvas_height / 2.0),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            hp: tuning.player_hp,
            max_hp: tuning.player_hp,
            last_shot_ms: None,
            invulnerable_ticks: 0,
            shield_ticks: 0,
            multishot_ticks: 0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Smaller hitbox used against enemy bullets
    #[inline]
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(PLAYER_HITBOX_INSET)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield_ticks > 0
    }

    #[inline]
    pub fn multishot_active(&self) -> bool {
        self.multishot_ticks > 0
    }

    /// Invulnerable or shielded: exempt from bullet, beam and ram damage
    #[inline]
    pub fn is_immune(&self) -> bool {
        self.invulnerable_ticks > 0 || self.shield_active()
    }

    /// Subtract hp, never going below zero
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).clamp(0, self.max_hp);
    }

    /// Restore hp up to max. Returns false if already full.
    pub fn heal(&mut self, amount: i32) -> bool {
        if self.hp >= self.max_hp {
            return false;
        }
        self.hp = (self.hp + amount).min(self.max_hp);
        true
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Count down the tick-based timers
    pub fn tick_timers(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.multishot_ticks = self.multishot_ticks.saturating_sub(1);
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A bullet or bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub owner: ProjectileOwner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: i32,
    pub color: u32,
    /// Bombs get drag and a little gravity
    pub is_bomb: bool,
    /// Hit something this tick; pruned at cleanup
    pub consumed: bool,
}

impl Projectile {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        !self.consumed
    }
}

/// Laser lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserState {
    /// Charging; harmless telegraph line
    Warning,
    /// Damaging full-width beam
    Firing,
}

/// A Destroyer's laser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub id: EntityId,
    /// Owning enemy, resolved by lookup every tick
    pub owner_id: EntityId,
    /// Beam centre line
    pub y: f32,
    pub thickness: f32,
    pub state: LaserState,
    /// Ticks remaining in the current state
    pub timer: u32,
}

impl Laser {
    /// The beam spans the whole canvas width
    pub fn beam_rect(&self, canvas_width: f32) -> Rect {
        Rect::new(0.0, self.y - self.thickness / 2.0, canvas_width, self.thickness)
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        self.state == LaserState::Firing
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Heart,
    Shield,
    Multishot,
    Bomb,
}

/// A pickup drifting left across the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl PowerUp {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Cues for the audio, haptic and flash collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerShot,
    EnemyShot,
    LaserCharge,
    BombThrow,
    Explosion,
    Crash,
    PowerUp,
    ScreenFlash,
    /// Vibration pulse for touch devices
    Haptic { millis: u32 },
    GameOver,
}

/// Values the HUD displays after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub hp: i32,
    pub max_hp: i32,
    pub score: u64,
    pub shield_secs: u32,
    pub multishot_secs: u32,
    pub game_over: bool,
}

fn gameplay_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

fn fx_rng() -> Pcg32 {
    Pcg32::seed_from_u64(FX_STREAM_SALT)
}

/// Complete game state (serializable as the render snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG streams were created from
    pub seed: u64,
    /// Balance table in effect
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Non-decreasing within a run
    pub score: u64,
    /// Simulation tick counter (reset per run)
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub lasers: Vec<Laser>,
    pub powerups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Cues raised during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Gameplay rolls: spawns, attacks, drops, bomb
    #[serde(skip, default = "gameplay_rng")]
    rng: Pcg32,
    /// Cosmetic rolls only, so particle caps never shift gameplay
    #[serde(skip, default = "fx_rng")]
    fx_rng: Pcg32,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a game state in the menu phase with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            player: Player::new(&tuning),
            tuning,
            phase: GamePhase::Menu,
            score: 0,
            time_ticks: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            lasers: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_STREAM_SALT),
            next_id: 1,
        }
    }

    /// Begin a fresh run: new player, empty world, score and clock reset
    pub fn start_run(&mut self) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.lasers.clear();
        self.powerups.clear();
        self.particles.clear();
        self.events.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        log::info!("Run started (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform gameplay roll in [0, 1)
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the cues raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            score: self.score,
            shield_secs: ticks_to_display_seconds(self.player.shield_ticks),
            multishot_secs: ticks_to_display_seconds(self.player.multishot_ticks),
            game_over: self.phase == GamePhase::GameOver,
        }
    }

    // --- insertion ---

    /// Add an enemy with a fresh id and a random shoot-phase offset
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let shoot_offset = self.rng.random_range(0..kind.shoot_period());
        self.enemies.push(Enemy::new(id, kind, pos, shoot_offset));
        id
    }

    #[allow(clippy::too_many_arguments)]
    pub fn spawn_projectile(
        &mut self,
        owner: ProjectileOwner,
        pos: Vec2,
        vel: Vec2,
        size: Vec2,
        damage: i32,
        color: u32,
        is_bomb: bool,
    ) -> EntityId {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            owner,
            pos,
            vel,
            size,
            damage,
            color,
            is_bomb,
            consumed: false,
        });
        id
    }

    pub fn spawn_laser(&mut self, owner_id: EntityId, y: f32) -> EntityId {
        let id = self.next_entity_id();
        self.lasers.push(Laser {
            id,
            owner_id,
            y,
            thickness: LASER_THICKNESS,
            state: LaserState::Warning,
            timer: LASER_WARNING_TICKS,
        });
        id
    }

    /// Drop a power-up centred on `center`
    pub fn spawn_powerup(&mut self, kind: PowerUpKind, center: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let size = Vec2::splat(POWERUP_SIZE);
        self.powerups.push(PowerUp {
            id,
            kind,
            pos: center - size / 2.0,
            size,
        });
        id
    }

    /// Scatter `count` particles from `pos`; evicts the oldest beyond the cap
    pub fn burst(&mut self, pos: Vec2, color: u32, count: usize, speed: f32) {
        let cap = self.tuning.max_particles;
        if cap == 0 {
            return;
        }
        let count = count.min(cap);
        let excess = (self.particles.len() + count).saturating_sub(cap);
        self.particles.drain(..excess);

        for _ in 0..count {
            let vel = Vec2::new(
                (self.fx_rng.random::<f32>() - 0.5) * speed,
                (self.fx_rng.random::<f32>() - 0.5) * speed,
            );
            let size = self.fx_rng.random::<f32>() * 4.0 + 1.0;
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life: 1.0,
                size,
            });
        }
    }

    // --- lookup ---

    /// Living enemy by id
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id && e.is_alive())
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id && e.is_alive())
    }

    // --- removal ---

    pub fn remove_enemies_where(&mut self, pred: impl Fn(&Enemy) -> bool) {
        self.enemies.retain(|e| !pred(e));
    }

    pub fn remove_projectiles_where(&mut self, pred: impl Fn(&Projectile) -> bool) {
        self.projectiles.retain(|p| !pred(p));
    }

    pub fn remove_powerups_where(&mut self, pred: impl Fn(&PowerUp) -> bool) {
        self.powerups.retain(|p| !pred(p));
    }

    /// Drop lasers whose owner is no longer alive in the world
    pub fn prune_orphan_lasers(&mut self) {
        let enemies = &self.enemies;
        self.lasers
            .retain(|l| enemies.iter().any(|e| e.id == l.owner_id && e.is_alive()));
    }

    /// End-of-pass cleanup: dead enemies, spent bullets, orphaned lasers
    pub fn prune(&mut self) {
        self.remove_enemies_where(|e| !e.is_alive());
        self.remove_projectiles_where(|p| !p.is_live());
        self.prune_orphan_lasers();
    }
}
