//! Interaction controller
//!
//! Placed on an object with a trigger volume. When the player's body is
//! inside the volume and the interact action is pressed, the controller fires
//! once: it plays back its feedback queue, grants its reward skin to the
//! player and bumps the objective screen. After that it ignores everything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::checklist::{self, ChecklistError};
use super::{ObjectiveScreen, RenderComponent, SkinCollection};
use crate::config::InteractionConfig;
use crate::ecs::{persist, Component, ComponentType, Context, EntityId, PersistedData, UpdateContext, World};
use crate::foundation::{MaterialHandle, MeshHandle, Vec3};
use crate::input::LogicalAction;
use crate::physics::{BodyRef, TriggerEvent};

/// Errors from applying a single feedback action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// Target entity is gone
    #[error("Feedback target {0} does not exist")]
    MissingTarget(EntityId),

    /// Target cannot swap material or mesh
    #[error("Feedback target {0} has no render component")]
    MissingRenderer(EntityId),

    /// `MarkChecklist` with no tracker bound
    #[error("No checklist bound to this controller")]
    NoChecklist,

    /// Tracker rejected the mark
    #[error("Checklist error: {0}")]
    Checklist(#[from] ChecklistError),
}

/// Controller-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    /// The controller already fired
    #[error("Interaction already activated")]
    AlreadyActivated,

    /// Entity lacks a controller
    #[error("Entity {0} has no interaction controller")]
    MissingController(EntityId),
}

/// Which part of a transform a [`TransformOp`] sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    /// Absolute position
    Position,
    /// Absolute rotation, Euler degrees
    Rotation,
    /// Absolute scale
    Scale,
}

/// One absolute transform assignment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformOp {
    /// Field to set
    pub kind: TransformKind,
    /// New value
    pub value: Vec3,
}

impl TransformOp {
    /// Set position
    pub fn position(value: Vec3) -> Self {
        Self { kind: TransformKind::Position, value }
    }

    /// Set rotation (Euler degrees)
    pub fn rotation(value: Vec3) -> Self {
        Self { kind: TransformKind::Rotation, value }
    }

    /// Set scale
    pub fn scale(value: Vec3) -> Self {
        Self { kind: TransformKind::Scale, value }
    }
}

/// A queued side effect played back when an interaction fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedbackAction {
    /// Replace the target's material
    SwapMaterial {
        /// Entity whose renderer changes
        target: EntityId,
        /// New material
        material: MaterialHandle,
    },
    /// Replace the target's mesh
    SwapMesh {
        /// Entity whose renderer changes
        target: EntityId,
        /// New mesh
        mesh: MeshHandle,
    },
    /// Apply transform assignments to the target, in order
    SetTransform {
        /// Entity to move
        target: EntityId,
        /// Assignments applied in order
        ops: Vec<TransformOp>,
    },
    /// Cross off a line of the bound checklist
    MarkChecklist {
        /// Checklist line
        index: usize,
    },
}

impl FeedbackAction {
    /// Apply this action to the world. `checklist` is the tracker entity bound
    /// to the controller, if any.
    pub fn apply(&self, world: &mut World, checklist: Option<EntityId>) -> Result<(), FeedbackError> {
        match self {
            Self::SwapMaterial { target, material } => {
                Self::renderer(world, *target)?.set_material(*material);
                log::debug!("Swapped material of {} to {}", target, material);
            }
            Self::SwapMesh { target, mesh } => {
                Self::renderer(world, *target)?.set_mesh(*mesh);
                log::debug!("Swapped mesh of {} to {}", target, mesh);
            }
            Self::SetTransform { target, ops } => {
                let transform = world
                    .transform_mut(*target)
                    .ok_or(FeedbackError::MissingTarget(*target))?;
                for op in ops {
                    match op.kind {
                        TransformKind::Position => transform.position = op.value,
                        TransformKind::Rotation => transform.rotation = op.value,
                        TransformKind::Scale => transform.scale = op.value,
                    }
                }
            }
            Self::MarkChecklist { index } => {
                let tracker = checklist.ok_or(FeedbackError::NoChecklist)?;
                checklist::mark_complete(world, tracker, *index)?;
            }
        }
        Ok(())
    }

    fn renderer(world: &mut World, target: EntityId) -> Result<&mut RenderComponent, FeedbackError> {
        if !world.contains(target) {
            return Err(FeedbackError::MissingTarget(target));
        }
        world
            .get_mut::<RenderComponent>(target)
            .ok_or(FeedbackError::MissingRenderer(target))
    }
}

/// Observable state of an [`InteractionController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// Waiting for a body to enter
    Idle,
    /// A body is inside and the action has not been pressed yet
    PlayerPresent,
    /// Fired; terminal
    Activated,
}

/// What happened when a controller fired
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ActivationReport {
    /// Feedback actions that applied cleanly
    pub applied: usize,
    /// Feedback actions that failed, by queue position
    pub failed: Vec<(usize, FeedbackError)>,
    /// Whether the reward skin reached the interacting body's owner
    pub reward_granted: bool,
    /// Whether the objective screen was bumped
    pub screen_updated: bool,
}

/// One-shot interaction state machine with a feedback queue.
///
/// Runtime state and authoring both come from scene setup; persists as an
/// empty object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionController {
    #[serde(skip)]
    feedback: Vec<FeedbackAction>,
    #[serde(skip)]
    presence: bool,
    #[serde(skip)]
    activated: bool,
    #[serde(skip)]
    pending_body: Option<BodyRef>,
    #[serde(skip)]
    reward: Option<MaterialHandle>,
    #[serde(skip)]
    checklist: Option<EntityId>,
    #[serde(skip)]
    screen: Option<EntityId>,
    #[serde(skip)]
    action: Option<LogicalAction>,
}

impl InteractionController {
    /// Create an idle controller with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feedback action to the queue
    pub fn add_feedback(&mut self, action: FeedbackAction) -> &mut Self {
        self.feedback.push(action);
        self
    }

    /// Set the skin granted to the interacting player
    pub fn set_reward(&mut self, reward: MaterialHandle) -> &mut Self {
        self.reward = Some(reward);
        self
    }

    /// Bind the checklist tracker entity used by `MarkChecklist`
    pub fn bind_checklist(&mut self, tracker: EntityId) -> &mut Self {
        self.checklist = Some(tracker);
        self
    }

    /// Bind the objective screen entity
    pub fn bind_screen(&mut self, screen: EntityId) -> &mut Self {
        self.screen = Some(screen);
        self
    }

    /// Set the logical action that fires the interaction
    pub fn set_action(&mut self, action: LogicalAction) -> &mut Self {
        self.action = Some(action);
        self
    }

    /// Fill unbound checklist and screen by their configured entity names and
    /// take the configured action unless one was set.
    pub fn bind_well_known(&mut self, world: &World, config: &InteractionConfig) {
        self.action.get_or_insert(config.interact_action);
        if self.checklist.is_none() {
            self.checklist = world.find_by_name(&config.checklist_entity);
            if self.checklist.is_none() {
                log::warn!("No checklist entity named '{}'", config.checklist_entity);
            }
        }
        if self.screen.is_none() {
            self.screen = world.find_by_name(&config.objective_screen_entity);
            if self.screen.is_none() {
                log::warn!("No objective screen entity named '{}'", config.objective_screen_entity);
            }
        }
    }

    /// Logical action that fires the interaction
    pub fn action(&self) -> LogicalAction {
        self.action.unwrap_or_default()
    }

    /// Queued feedback actions
    pub fn feedback(&self) -> &[FeedbackAction] {
        &self.feedback
    }

    /// Reward skin
    pub fn reward(&self) -> Option<MaterialHandle> {
        self.reward
    }

    /// Bound checklist tracker entity
    pub fn checklist(&self) -> Option<EntityId> {
        self.checklist
    }

    /// Bound objective screen entity
    pub fn screen(&self) -> Option<EntityId> {
        self.screen
    }

    /// Body waiting to interact
    pub fn pending_body(&self) -> Option<BodyRef> {
        self.pending_body
    }

    /// Whether the controller has fired
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Current state
    pub fn state(&self) -> InteractionState {
        if self.activated {
            InteractionState::Activated
        } else if self.presence {
            InteractionState::PlayerPresent
        } else {
            InteractionState::Idle
        }
    }

    /// A body entered the trigger volume
    pub fn body_entered(&mut self, body: BodyRef, world: &World) {
        if self.activated {
            log::debug!("Body entered an activated interaction; ignored");
            return;
        }
        log::info!("Body has entered our trigger volume: {}", owner_name(world, body));
        self.presence = true;
        self.pending_body = Some(body);
    }

    /// A body left the trigger volume
    pub fn body_left(&mut self, body: BodyRef, world: &World) {
        if self.activated {
            log::debug!("Body left an activated interaction; ignored");
            return;
        }
        log::info!("Body has left our trigger volume: {}", owner_name(world, body));
        self.presence = false;
        self.pending_body = None;
    }

    /// Fire the interaction.
    ///
    /// Plays back the feedback queue in order, then grants the reward to the
    /// pending body's owner, then bumps the objective screen. Individual
    /// failures are logged and reported; they never stop the rest.
    pub fn activate(&mut self, world: &mut World) -> Result<ActivationReport, InteractionError> {
        if self.activated {
            log::error!("Interaction activated twice; ignoring");
            return Err(InteractionError::AlreadyActivated);
        }
        self.activated = true;
        self.presence = false;

        let mut report = ActivationReport::default();
        for (position, action) in self.feedback.iter().enumerate() {
            match action.apply(world, self.checklist) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    log::error!("Feedback action {} failed: {}", position, err);
                    report.failed.push((position, err));
                }
            }
        }

        report.reward_granted = self.grant_reward(world);
        report.screen_updated = self.bump_screen(world);
        self.pending_body = None;

        log::info!(
            "Interaction fired: {} feedback applied, {} failed",
            report.applied,
            report.failed.len()
        );
        Ok(report)
    }

    fn grant_reward(&self, world: &mut World) -> bool {
        let Some(body) = self.pending_body else {
            log::error!("Interaction fired with no pending body; reward skipped");
            return false;
        };
        let Some(reward) = self.reward else {
            log::debug!("Interaction has no reward");
            return false;
        };
        match world.get_mut::<SkinCollection>(body.owner()) {
            Some(skins) => {
                skins.add_skin(reward);
                true
            }
            None => {
                log::warn!("Body owner {} has no skin collection; reward skipped", body.owner());
                false
            }
        }
    }

    fn bump_screen(&self, world: &mut World) -> bool {
        let Some(screen) = self.screen.and_then(|id| world.get_mut::<ObjectiveScreen>(id)) else {
            log::warn!("No objective screen bound; counter not updated");
            return false;
        };
        let achieved = screen.record_objective();
        log::info!("Objectives achieved: {}", achieved);
        true
    }
}

fn owner_name(world: &World, body: BodyRef) -> &str {
    world.entity(body.owner()).map_or("<gone>", |e| e.name())
}

impl Component for InteractionController {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if !self.presence || self.activated {
            return;
        }
        if !ctx.input.is_action_pressed_this_tick(self.action()) {
            return;
        }
        match self.activate(ctx.world) {
            Ok(report) if !report.failed.is_empty() => {
                log::warn!(
                    "Interaction on {} fired with {} failed feedback actions",
                    ctx.owner,
                    report.failed.len()
                );
            }
            Ok(_) => {}
            Err(err) => log::error!("Interaction on {} did not fire: {}", ctx.owner, err),
        }
    }

    fn handles_triggers(&self) -> bool {
        true
    }

    fn on_trigger(&mut self, event: TriggerEvent, ctx: &mut Context<'_>) {
        match event {
            TriggerEvent::Entered(body) => self.body_entered(body, ctx.world),
            TriggerEvent::Leaving(body) => self.body_left(body, ctx.world),
        }
    }

    fn to_persisted(&self) -> Result<PersistedData, serde_json::Error> {
        persist(self)
    }
}

impl ComponentType for InteractionController {
    const TYPE_KEY: &'static str = "InteractionController";
}

/// Fire the controller on `entity` directly, bypassing input
pub fn activate(world: &mut World, entity: EntityId) -> Result<ActivationReport, InteractionError> {
    world
        .with_component::<InteractionController, _>(entity, |controller, world| controller.activate(world))
        .ok_or(InteractionError::MissingController(entity))?
}
