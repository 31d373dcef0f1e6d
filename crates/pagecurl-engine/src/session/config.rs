use crate::paint::Color;
use crate::policy::ProjectionConfig;
use crate::scene::SceneDesc;

/// Everything needed to create a render session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Color the view is cleared to before drawing.
    pub clear_color: Color,

    /// Camera projection applied on resize.
    pub projection: ProjectionConfig,

    /// Resources built into the scene at creation.
    pub scene: SceneDesc,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::RED,
            projection: ProjectionConfig::default(),
            scene: SceneDesc::default(),
        }
    }
}
