use std::rc::Rc;

use survivor_bt::{BehaviorTree, BtStatus, LeafContract};
use survivor_core::{Blackboard, TickContext};
use survivor_nav::Vec2;
use survivor_steering::{PathService, SteeringCommand, SteeringKind, SteeringSet, SteeringTarget};
use tracing::{debug, info, warn};

use crate::config::DecisionConfig;
use crate::error::AgentError;
use crate::facts::AgentState;
use crate::host::{AgentHost, AgentHostMut};
use crate::inventory::Inventory;
use crate::keys;
use crate::perception;
use crate::policy;

/// What one tick decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub behavior: SteeringKind,
    pub status: BtStatus,
    pub target: Option<SteeringTarget>,
    pub command: SteeringCommand,
}

/// Routes seek-style behaviors through the host's path service.
struct HostPath<'a, H: ?Sized>(&'a H);

impl<H> PathService for HostPath<'_, H>
where
    H: AgentHost + ?Sized,
{
    fn closest_path_point(&self, _from: Vec2, to: Vec2) -> Vec2 {
        self.0.closest_path_point(to)
    }
}

/// One agent's decision loop: perception, tree, steering.
pub struct DecisionCore<H>
where
    H: AgentHostMut + 'static,
{
    config: Rc<DecisionConfig>,
    blackboard: Blackboard,
    tree: BehaviorTree<H>,
    steering: SteeringSet,
    running: bool,
}

impl<H> DecisionCore<H>
where
    H: AgentHostMut + 'static,
{
    /// Seed the blackboard from the host's initial state and build the tree.
    pub fn new(host: &H, config: DecisionConfig) -> Result<Self, AgentError> {
        let config = Rc::new(config);
        let mut blackboard = Blackboard::new();
        keys::seed(
            &mut blackboard,
            host.agent(),
            host.world_bounds(),
            host.inventory_capacity(),
            &config,
        )?;
        let tree = policy::build_tree(Rc::clone(&config))?;
        let steering = SteeringSet::new(config.steering.clone());
        Ok(Self {
            config,
            blackboard,
            tree,
            steering,
            running: false,
        })
    }

    pub fn tick(&mut self, ctx: &TickContext, host: &mut H) -> TickOutput {
        if let Err(err) = perception::perceive(&self.config, ctx, &*host, &mut self.blackboard) {
            warn!(%err, "perception failed, deciding on stale facts");
        }

        let status = self.tree.tick(ctx, host, &mut self.blackboard);
        let behavior = self
            .blackboard
            .get(keys::BEHAVIOR)
            .copied()
            .unwrap_or_default();
        let target = self.blackboard.get(keys::TARGET).ok().copied().flatten();
        debug!(tick = ctx.tick, behavior = behavior.as_str(), ?status, "behavior selected");

        let agent = host.agent();
        let mut command = self.steering.compute(
            behavior,
            &agent.kinematics(),
            target.as_ref(),
            ctx,
            &HostPath(&*host),
        );
        command.run_mode = self.update_run_mode(&agent);

        TickOutput {
            behavior,
            status,
            target,
            command,
        }
    }

    /// Start running after a bite while there is stamina to spend; stop when
    /// it is gone.
    fn update_run_mode(&mut self, agent: &AgentState) -> bool {
        let was_running = self.running;
        if agent.was_bitten && agent.stamina >= self.config.run_stamina_threshold {
            self.running = true;
        }
        if agent.stamina <= 0.0 {
            self.running = false;
        }
        if self.running != was_running {
            info!(running = self.running, stamina = agent.stamina, "run mode toggled");
        }
        self.running
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    /// For hosts restoring agent memory (inventory, explored houses) between sessions.
    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.blackboard.get(keys::INVENTORY).ok()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn contracts(&self) -> Vec<LeafContract> {
        self.tree.contracts()
    }
}
