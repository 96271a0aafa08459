//! Render component for entities that can be drawn
//!
//! Holds opaque material and mesh handles; the renderer resolves them. Feedback
//! actions swap these handles at runtime.

use serde::{Deserialize, Serialize};

use crate::ecs::{persist, Component, ComponentType, PersistedData};
use crate::foundation::{MaterialHandle, MeshHandle};

/// Component for entities that can be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderComponent {
    material: Option<MaterialHandle>,
    mesh: Option<MeshHandle>,
    /// Whether this object is visible
    pub visible: bool,
}

impl RenderComponent {
    /// Create a visible render component with no handles assigned
    pub fn new() -> Self {
        Self {
            material: None,
            mesh: None,
            visible: true,
        }
    }

    /// Builder: assign a material
    pub fn with_material(mut self, material: MaterialHandle) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder: assign a mesh
    pub fn with_mesh(mut self, mesh: MeshHandle) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Current material
    pub fn material(&self) -> Option<MaterialHandle> {
        self.material
    }

    /// Current mesh
    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Set the material
    pub fn set_material(&mut self, material: MaterialHandle) {
        self.material = Some(material);
    }

    /// Set the mesh
    pub fn set_mesh(&mut self, mesh: MeshHandle) {
        self.mesh = Some(mesh);
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if this component should be rendered
    pub fn should_render(&self) -> bool {
        self.visible && self.material.is_some() && self.mesh.is_some()
    }
}

impl Default for RenderComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RenderComponent {
    fn to_persisted(&self) -> Result<PersistedData, serde_json::Error> {
        persist(self)
    }
}

impl ComponentType for RenderComponent {
    const TYPE_KEY: &'static str = "RenderComponent";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swaps_replace_handles() {
        let mut render = RenderComponent::new().with_material(MaterialHandle(1)).with_mesh(MeshHandle(1));
        assert!(render.should_render());

        render.set_material(MaterialHandle(2));
        render.set_mesh(MeshHandle(3));
        assert_eq!(render.material(), Some(MaterialHandle(2)));
        assert_eq!(render.mesh(), Some(MeshHandle(3)));

        render.set_visible(false);
        assert!(!render.should_render());
    }

    #[test]
    fn test_missing_fields_default_on_load() {
        let render: RenderComponent = serde_json::from_str(r#"{ "material": 4 }"#).unwrap();
        assert_eq!(render.material(), Some(MaterialHandle(4)));
        assert_eq!(render.mesh(), None);
        assert!(render.visible);
    }
}
