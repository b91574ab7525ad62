//! Generated arena the CLI drives the decision core through.

use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::io::Write;

use serde::Serialize;
use survivor_agent::policy::ray_hits_circle;
use survivor_agent::{
    AgentHost, AgentHostMut, AgentState, EnemyInfo, EnemyKind, EntityId, HazardZone, HouseInfo,
    ItemInfo, ItemKind, PerceivedEntity, TickOutput, WorldBounds,
};
use survivor_bt::BtStatus;
use survivor_core::{DeterministicRng, SplitMix64, TickContext, WorldMut, WorldView};
use survivor_nav::{GridGraph, Vec2};
use survivor_steering::SteeringCommand;

const ENEMY_STREAM: u64 = 0x454e_454d;

/// Knobs for arena generation.
#[derive(Debug, Clone)]
pub struct ArenaSpec {
    pub size: f32,
    pub obstacle_cell: f32,
    pub obstacles: usize,
    pub items: usize,
    pub houses: usize,
    pub hazards: usize,
    pub enemies: usize,
    pub fov_range: f32,
    pub inventory_capacity: usize,
    pub grab_range: f32,
    /// Enemies closer than this chase the agent.
    pub chase_range: f32,
}

impl Default for ArenaSpec {
    fn default() -> Self {
        Self {
            size: 300.0,
            obstacle_cell: 10.0,
            obstacles: 60,
            items: 30,
            houses: 4,
            hazards: 2,
            enemies: 6,
            fov_range: 30.0,
            inventory_capacity: 5,
            grab_range: 2.5,
            chase_range: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    pub picked_up: u32,
    pub consumed: u32,
    pub shots: u32,
    pub kills: u32,
    pub bites: u32,
}

pub struct SimWorld {
    agent: AgentState,
    bounds: WorldBounds,
    grid: GridGraph,
    houses: Vec<HouseInfo>,
    items: Vec<ItemInfo>,
    hazards: Vec<HazardZone>,
    enemies: Vec<EnemyInfo>,
    slots: Vec<Option<ItemInfo>>,
    grab_range: f32,
    chase_range: f32,
    stats: SimStats,
}

impl SimWorld {
    pub fn generate(spec: &ArenaSpec, seed: u64) -> Self {
        let mut rng = SplitMix64::new(seed);
        let half = spec.size / 2.0;
        let bounds = WorldBounds::new(Vec2::ZERO, Vec2::new(spec.size, spec.size));
        let cells = (spec.size / spec.obstacle_cell).max(1.0) as u32;
        let mut grid = GridGraph::new(cells, cells, spec.obstacle_cell)
            .with_origin(Vec2::new(-half, -half));

        // Keep the spawn area clear.
        let spawn = grid.cell_at(Vec2::ZERO).and_then(|n| grid.cell_of(n));
        for _ in 0..spec.obstacles {
            let x = (rng.next_u32() % cells) as i32;
            let y = (rng.next_u32() % cells) as i32;
            let near_spawn = spawn.is_some_and(|(sx, sy)| (sx - x).abs() <= 2 && (sy - y).abs() <= 2);
            if !near_spawn {
                grid.set_blocked(x, y, true);
            }
        }

        let mut world = Self {
            agent: AgentState {
                fov_range: spec.fov_range,
                ..AgentState::default()
            },
            bounds,
            grid,
            houses: Vec::new(),
            items: Vec::new(),
            hazards: Vec::new(),
            enemies: Vec::new(),
            slots: vec![None; spec.inventory_capacity],
            grab_range: spec.grab_range,
            chase_range: spec.chase_range,
            stats: SimStats::default(),
        };

        for _ in 0..spec.houses {
            let center = world.random_open_point(&mut rng, 20.0);
            let size = Vec2::new(rng.next_f32_range(12.0, 24.0), rng.next_f32_range(12.0, 24.0));
            world.clear_area(center, size / 2.0);
            world.houses.push(HouseInfo { center, size });
        }

        let mut next_id = 1u64;
        let mut id = || {
            next_id += 1;
            EntityId(next_id)
        };

        for _ in 0..spec.items {
            let location = world.random_open_point(&mut rng, 5.0);
            let (kind, charge) = match rng.next_u32() % 4 {
                0 => (ItemKind::Pistol, 3 + (rng.next_u32() % 6) as i32),
                1 => (ItemKind::Food, 1 + (rng.next_u32() % 5) as i32),
                2 => (ItemKind::Medkit, 1 + (rng.next_u32() % 5) as i32),
                _ => (ItemKind::Garbage, 0),
            };
            world.items.push(ItemInfo {
                entity: id(),
                kind,
                location,
                charge,
            });
        }

        for _ in 0..spec.hazards {
            let center = world.random_open_point(&mut rng, 30.0);
            world.hazards.push(HazardZone {
                entity: id(),
                center,
                radius: rng.next_f32_range(8.0, 15.0),
            });
        }

        for _ in 0..spec.enemies {
            let location = world.random_open_point(&mut rng, 40.0);
            let (kind, size) = match rng.next_u32() % 3 {
                0 => (EnemyKind::Runner, 1.0),
                1 => (EnemyKind::Heavy, 1.5),
                _ => (EnemyKind::Normal, 1.0),
            };
            let heading = Vec2::from_angle(rng.next_f32_range(0.0, TAU));
            world.enemies.push(EnemyInfo {
                entity: id(),
                kind,
                location,
                linear_velocity: heading * enemy_speed(kind),
                size,
            });
        }

        world
    }

    /// A point on an open cell at least `clearance` from the spawn point.
    fn random_open_point(&self, rng: &mut SplitMix64, clearance: f32) -> Vec2 {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        for _ in 0..64 {
            let p = Vec2::new(
                rng.next_f32_range(min.x + 5.0, max.x - 5.0),
                rng.next_f32_range(min.y + 5.0, max.y - 5.0),
            );
            if p.length() >= clearance && !self.blocked_at(p) {
                return p;
            }
        }
        Vec2::new(clearance, 0.0)
    }

    fn clear_area(&mut self, center: Vec2, half: Vec2) {
        let cell = self.grid.cell_size();
        let mut y = center.y - half.y;
        while y <= center.y + half.y + cell {
            let mut x = center.x - half.x;
            while x <= center.x + half.x + cell {
                if let Some((cx, cy)) = self.grid.cell_at(Vec2::new(x, y)).and_then(|n| self.grid.cell_of(n)) {
                    self.grid.set_blocked(cx, cy, false);
                }
                x += cell;
            }
            y += cell;
        }
    }

    fn blocked_at(&self, p: Vec2) -> bool {
        match self.grid.cell_at(p).and_then(|n| self.grid.cell_of(n)) {
            Some((x, y)) => self.grid.is_blocked(x, y),
            None => false,
        }
    }

    /// Apply the agent's command and advance everything else by one tick.
    pub fn step(&mut self, ctx: &TickContext, command: &SteeringCommand) {
        let dt = ctx.dt_seconds;
        self.move_agent(command, dt);
        self.update_stats(command, dt);
        self.move_enemies(ctx);

        let position = self.agent.position;
        let bitten = self
            .enemies
            .iter()
            .any(|e| e.location.distance(position) <= e.size + 0.5);
        self.agent.was_bitten = bitten;
        if bitten {
            self.stats.bites += 1;
            self.agent.health -= 2.0 * dt;
        }
        self.agent.is_in_house = self.houses.iter().any(|h| h.contains(position));
    }

    fn move_agent(&mut self, command: &SteeringCommand, dt: f32) {
        let agent = &mut self.agent;
        let running = command.run_mode && agent.stamina > 0.0;
        let cap = agent.max_linear_speed * if running { 2.0 } else { 1.0 };
        let mut velocity = command.linear_velocity;
        if velocity.length() > cap {
            velocity = velocity.normalize_or_zero() * cap;
        }

        if command.auto_orient {
            if velocity.length_squared() > 1e-6 {
                agent.orientation = velocity.angle() + FRAC_PI_2;
            }
        } else {
            let spin = command
                .angular_velocity
                .clamp(-agent.max_angular_speed, agent.max_angular_speed);
            agent.orientation += spin * dt;
        }

        let next = agent.position + velocity * dt;
        let (min, max) = (self.bounds.min(), self.bounds.max());
        let next = Vec2::new(
            next.x.clamp(min.x - 5.0, max.x + 5.0),
            next.y.clamp(min.y - 5.0, max.y + 5.0),
        );
        if self.blocked_at(next) {
            self.agent.linear_velocity = Vec2::ZERO;
        } else {
            self.agent.position = next;
            self.agent.linear_velocity = velocity;
        }
    }

    fn update_stats(&mut self, command: &SteeringCommand, dt: f32) {
        let agent = &mut self.agent;
        if command.run_mode && agent.stamina > 0.0 {
            agent.stamina = (agent.stamina - 2.0 * dt).max(0.0);
        } else {
            agent.stamina = (agent.stamina + 0.5 * dt).min(10.0);
        }
        agent.energy = (agent.energy - 0.05 * dt).max(0.0);
        if agent.energy <= 0.0 {
            agent.health -= 0.5 * dt;
        }
        let position = agent.position;
        if self
            .hazards
            .iter()
            .any(|z| z.center.distance(position) < z.radius)
        {
            self.agent.health -= 3.0 * dt;
        }
    }

    fn move_enemies(&mut self, ctx: &TickContext) {
        let mut rng = ctx.rng(ENEMY_STREAM);
        let target = self.agent.position;
        let (min, max) = (self.bounds.min(), self.bounds.max());
        for enemy in &mut self.enemies {
            let speed = enemy_speed(enemy.kind);
            let to_agent = target - enemy.location;
            enemy.linear_velocity = if to_agent.length() < self.chase_range {
                to_agent.normalize_or_zero() * speed
            } else {
                let turn = rng.next_f32_range(-0.3, 0.3);
                Vec2::from_angle(enemy.linear_velocity.angle() + turn) * speed
            };
            let next = enemy.location + enemy.linear_velocity * ctx.dt_seconds;
            if next.x < min.x || next.x > max.x || next.y < min.y || next.y > max.y {
                enemy.linear_velocity = -enemy.linear_velocity;
            } else {
                enemy.location = next;
            }
        }
    }

    /// Kill the first enemy on the agent's line of fire, within sight range.
    fn fire(&mut self) {
        self.stats.shots += 1;
        let agent = self.agent;
        let heading = agent.heading();
        let hit = self.enemies.iter().position(|e| {
            e.location.distance(agent.position) <= agent.fov_range
                && ray_hits_circle(agent.position, heading, e.location, e.size)
        });
        if let Some(index) = hit {
            self.enemies.remove(index);
            self.stats.kills += 1;
            tracing::debug!(remaining = self.enemies.len(), "enemy down");
        }
    }

    pub fn agent_is_dead(&self) -> bool {
        self.agent.health <= 0.0
    }

    pub fn agent_state(&self) -> &AgentState {
        &self.agent
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn held_items(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

fn enemy_speed(kind: EnemyKind) -> f32 {
    match kind {
        EnemyKind::Normal => 1.5,
        EnemyKind::Runner => 3.0,
        EnemyKind::Heavy => 1.0,
    }
}

impl WorldView for SimWorld {}

impl WorldMut for SimWorld {}

impl AgentHost for SimWorld {
    fn agent(&self) -> AgentState {
        self.agent
    }

    fn world_bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn inventory_capacity(&self) -> usize {
        self.slots.len()
    }

    fn houses_in_fov(&self) -> Vec<HouseInfo> {
        let (p, range) = (self.agent.position, self.agent.fov_range);
        self.houses
            .iter()
            .filter(|h| h.center.distance(p) <= range)
            .copied()
            .collect()
    }

    fn entities_in_fov(&self) -> Vec<PerceivedEntity> {
        let (p, range) = (self.agent.position, self.agent.fov_range);
        let enemies = self
            .enemies
            .iter()
            .filter(|e| e.location.distance(p) <= range)
            .map(|e| PerceivedEntity::Enemy(*e));
        let items = self
            .items
            .iter()
            .filter(|i| i.location.distance(p) <= range)
            .map(|i| PerceivedEntity::Item(*i));
        let hazards = self
            .hazards
            .iter()
            .filter(|z| z.center.distance(p) - z.radius <= range)
            .map(|z| PerceivedEntity::Hazard(*z));
        enemies.chain(items).chain(hazards).collect()
    }

    fn closest_path_point(&self, target: Vec2) -> Vec2 {
        self.grid
            .next_path_point(self.agent.position, target)
            .unwrap_or(target)
    }

    fn inventory_slots(&self) -> Vec<Option<ItemInfo>> {
        self.slots.clone()
    }

    fn item_charge(&self, slot: usize) -> Option<i32> {
        self.slots.get(slot).copied().flatten().map(|i| i.charge)
    }
}

impl AgentHostMut for SimWorld {
    fn grab(&mut self, entity: EntityId) -> Option<ItemInfo> {
        let position = self.agent.position;
        let index = self
            .items
            .iter()
            .position(|i| i.entity == entity && i.location.distance(position) <= self.grab_range)?;
        self.stats.picked_up += 1;
        Some(self.items.remove(index))
    }

    fn add_item(&mut self, slot: usize, item: &ItemInfo) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry @ None) => {
                *entry = Some(*item);
                true
            }
            _ => false,
        }
    }

    fn use_item(&mut self, slot: usize) -> bool {
        let Some(Some(item)) = self.slots.get_mut(slot) else {
            return false;
        };
        match item.kind {
            ItemKind::Pistol => {
                if item.charge <= 0 {
                    return false;
                }
                item.charge -= 1;
                self.fire();
            }
            ItemKind::Food => {
                self.agent.energy = (self.agent.energy + item.charge as f32).min(10.0);
                self.stats.consumed += 1;
            }
            ItemKind::Medkit => {
                self.agent.health = (self.agent.health + item.charge as f32).min(10.0);
                self.stats.consumed += 1;
            }
            ItemKind::Garbage => return false,
        }
        true
    }

    fn remove_item(&mut self, slot: usize) -> bool {
        self.slots
            .get_mut(slot)
            .and_then(Option::take)
            .is_some()
    }
}

/// One line of `--json` output.
#[derive(Debug, Serialize)]
pub struct TraceRecord {
    pub tick: u64,
    pub behavior: &'static str,
    pub status: &'static str,
    pub position: Vec2,
    pub target: Option<Vec2>,
    pub health: f32,
    pub energy: f32,
    pub stamina: f32,
    pub run_mode: bool,
}

impl TraceRecord {
    pub fn new(tick: u64, decision: &TickOutput, world: &SimWorld) -> Self {
        let agent = world.agent_state();
        Self {
            tick,
            behavior: decision.behavior.as_str(),
            status: match decision.status {
                BtStatus::Running => "running",
                BtStatus::Success => "success",
                BtStatus::Failure => "failure",
            },
            position: agent.position,
            target: decision.target.map(|t| t.position),
            health: agent.health,
            energy: agent.energy,
            stamina: agent.stamina,
            run_mode: decision.command.run_mode,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub ticks: u64,
    pub behaviors: BTreeMap<&'static str, u64>,
    pub stats: SimStats,
    pub health: f32,
    pub energy: f32,
    pub held_items: usize,
}

impl Summary {
    pub fn record(&mut self, decision: &TickOutput) {
        self.ticks += 1;
        *self.behaviors.entry(decision.behavior.as_str()).or_default() += 1;
    }

    pub fn finish(&mut self, world: &SimWorld) {
        self.stats = world.stats();
        self.health = world.agent_state().health;
        self.energy = world.agent_state().energy;
        self.held_items = world.held_items();
    }

    pub fn print(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "Survivor Simulation")?;
        writeln!(out, "===================")?;
        writeln!(out)?;
        writeln!(out, "Ticks: {}", self.ticks)?;
        writeln!(out, "Behaviors:")?;
        for (behavior, count) in &self.behaviors {
            let share = *count as f64 * 100.0 / self.ticks.max(1) as f64;
            writeln!(out, "  {behavior:<10} {count:>6}  ({share:.1}%)")?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "Items: {} picked up, {} consumed, {} held",
            self.stats.picked_up, self.stats.consumed, self.held_items
        )?;
        writeln!(
            out,
            "Combat: {} shots, {} kills, {} bite ticks",
            self.stats.shots, self.stats.kills, self.stats.bites
        )?;
        writeln!(out, "Final health {:.1}, energy {:.1}", self.health, self.energy)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_agent::{DecisionConfig, DecisionCore};

    fn simulate(seed: u64, ticks: u64) -> Summary {
        let mut world = SimWorld::generate(&ArenaSpec::default(), seed);
        let mut core = DecisionCore::new(&world, DecisionConfig::default()).expect("core");
        let mut summary = Summary::default();
        let mut ctx = TickContext::new(0, 0.1, seed);
        for _ in 0..ticks {
            let decision = core.tick(&ctx, &mut world);
            world.step(&ctx, &decision.command);
            summary.record(&decision);
            if world.agent_is_dead() {
                break;
            }
            ctx = ctx.next();
        }
        summary.finish(&world);
        summary
    }

    #[test]
    fn generation_is_deterministic() {
        let a = SimWorld::generate(&ArenaSpec::default(), 9);
        let b = SimWorld::generate(&ArenaSpec::default(), 9);
        assert_eq!(a.items, b.items);
        assert_eq!(a.houses, b.houses);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.items.len(), ArenaSpec::default().items);
    }

    #[test]
    fn spawn_is_open() {
        let world = SimWorld::generate(&ArenaSpec::default(), 3);
        assert!(!world.blocked_at(Vec2::ZERO));
    }

    #[test]
    fn simulation_is_reproducible() {
        let a = simulate(5, 300);
        let b = simulate(5, 300);
        assert_eq!(a, b);
        assert!(a.ticks > 0);
        assert_eq!(a.behaviors.values().sum::<u64>(), a.ticks);
    }

    #[test]
    fn empty_pistol_does_not_fire() {
        let mut world = SimWorld::generate(&ArenaSpec::default(), 1);
        let pistol = ItemInfo {
            entity: EntityId(999),
            kind: ItemKind::Pistol,
            location: Vec2::ZERO,
            charge: 1,
        };
        assert!(world.add_item(0, &pistol));
        assert!(world.use_item(0));
        assert_eq!(world.item_charge(0), Some(0));
        assert!(!world.use_item(0));
        assert_eq!(world.stats().shots, 1);
    }

    #[test]
    fn summary_prints_histogram() {
        let summary = simulate(2, 50);
        let mut buf = Vec::new();
        summary.print(&mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("Ticks: "));
        assert!(text.contains("Behaviors:"));
    }
}
