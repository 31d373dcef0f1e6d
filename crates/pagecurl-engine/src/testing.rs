//! Recording fakes for unit tests.

use std::collections::HashMap;
use std::time::Instant;

use anyhow::{bail, Result};

use crate::coords::Viewport;
use crate::device::{Engine, SurfaceErrorAction};
use crate::frame::VsyncSource;
use crate::scene::{MaterialInfo, MaterialParameter, SceneDesc};
use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Create(u32),
    Destroy(u32),
    Resize(u32, u32, u32),
    Drain,
    Begin(u32),
    Render,
    End,
    BuildScene,
    LoadMaterial,
    ReleaseView,
    ReleaseRenderer,
}

#[derive(Debug)]
pub(crate) struct FakeTarget {
    id: u32,
}

impl FakeTarget {
    pub(crate) fn new(id: u32) -> Self {
        Self { id }
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    calls: Vec<Call>,
    live: usize,
    max_live: usize,
    sizes: HashMap<u32, (u32, u32)>,
    rendered_viewports: Vec<Viewport>,
    pub(crate) fail_next_create: bool,
    pub(crate) fail_scene: bool,
    pub(crate) begin_error: Option<SurfaceErrorAction>,
}

impl RecordingEngine {
    pub(crate) fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Only the swap target lifecycle calls.
    pub(crate) fn lifecycle_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .copied()
            .filter(|c| matches!(c, Call::Create(_) | Call::Destroy(_) | Call::Drain))
            .collect()
    }

    /// Only the per-frame calls.
    pub(crate) fn frame_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .copied()
            .filter(|c| matches!(c, Call::Begin(_) | Call::Render | Call::End))
            .collect()
    }

    pub(crate) fn live_targets(&self) -> usize {
        self.live
    }

    pub(crate) fn max_live_targets(&self) -> usize {
        self.max_live
    }

    pub(crate) fn drains(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Drain).count()
    }

    pub(crate) fn renders(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Render).count()
    }

    pub(crate) fn target_size(&self, id: u32) -> Option<(u32, u32)> {
        self.sizes.get(&id).copied()
    }

    pub(crate) fn rendered_viewports(&self) -> &[Viewport] {
        &self.rendered_viewports
    }
}

impl Engine for RecordingEngine {
    type Surface = u32;
    type SwapTarget = FakeTarget;

    fn create_swap_target(&mut self, surface: u32) -> Result<FakeTarget> {
        if std::mem::take(&mut self.fail_next_create) {
            bail!("surface {surface} rejected");
        }
        self.calls.push(Call::Create(surface));
        self.live += 1;
        self.max_live = self.max_live.max(self.live);
        Ok(FakeTarget::new(surface))
    }

    fn destroy_swap_target(&mut self, target: FakeTarget) {
        self.calls.push(Call::Destroy(target.id));
        self.live -= 1;
    }

    fn resize_swap_target(&mut self, target: &mut FakeTarget, width: u32, height: u32) {
        self.calls.push(Call::Resize(target.id, width, height));
        self.sizes.insert(target.id, (width, height));
    }

    fn flush_and_wait(&mut self) {
        self.calls.push(Call::Drain);
    }

    fn begin_frame(&mut self, target: &mut FakeTarget) -> Result<(), SurfaceErrorAction> {
        if let Some(action) = self.begin_error {
            return Err(action);
        }
        self.calls.push(Call::Begin(target.id));
        Ok(())
    }

    fn render(&mut self, view: &View) {
        self.calls.push(Call::Render);
        self.rendered_viewports.push(view.viewport());
    }

    fn end_frame(&mut self) {
        self.calls.push(Call::End);
    }

    fn build_scene(&mut self, _scene: &SceneDesc) -> Result<()> {
        if self.fail_scene {
            bail!("scene rejected");
        }
        self.calls.push(Call::BuildScene);
        Ok(())
    }

    fn load_material(&mut self, payload: &[u8]) -> Result<MaterialInfo> {
        self.calls.push(Call::LoadMaterial);
        let name = String::from_utf8_lossy(payload).into_owned();
        Ok(MaterialInfo {
            parameters: vec![MaterialParameter {
                name,
                kind: "f32".into(),
                count: 1,
                slot: None,
            }],
        })
    }

    fn release_view(&mut self, _view: &View) {
        self.calls.push(Call::ReleaseView);
    }

    fn release_renderer(&mut self) {
        self.calls.push(Call::ReleaseRenderer);
    }
}

/// Vsync source counting registrations.
#[derive(Debug, Default)]
pub(crate) struct CountingVsync {
    pub(crate) requests: usize,
    pub(crate) cancels: usize,
    pub(crate) presented: Vec<bool>,
}

impl VsyncSource for CountingVsync {
    fn request_frame(&mut self) {
        self.requests += 1;
    }

    fn cancel_frame(&mut self) {
        self.cancels += 1;
    }

    fn tick_finished(&mut self, _now: Instant, presented: bool) {
        self.presented.push(presented);
    }
}
