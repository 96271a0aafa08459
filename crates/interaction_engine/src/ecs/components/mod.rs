//! Built-in components
//!
//! Render handles, trigger volumes, the interaction controller with its
//! feedback queue, the checklist tracker and the reward/HUD sinks.

pub mod checklist;
pub mod interaction;
pub mod objective_screen;
pub mod render;
pub mod skin;
pub mod trigger_volume;

pub use checklist::{ChecklistError, ChecklistTracker, Completion};
pub use interaction::{
    ActivationReport, FeedbackAction, FeedbackError, InteractionController, InteractionError,
    InteractionState, TransformKind, TransformOp,
};
pub use objective_screen::ObjectiveScreen;
pub use render::RenderComponent;
pub use skin::SkinCollection;
pub use trigger_volume::TriggerVolume;
