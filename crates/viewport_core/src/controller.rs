//! Viewport controller: active mesh, orbit camera, reaction tint and the
//! animated background, plus the per-frame render step.
//!
//! All methods run on the host's UI thread. Input handlers only mutate state
//! and raise the redraw flag; drawing happens in `render_frame`.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use data_runtime::configs::model_catalog::ModelCatalog;
use lf_assets::{AssetError, load_gif_frames};

use crate::backend::{DrawParams, FrameBackend};
use crate::background::BackgroundAnimation;
use crate::camera::OrbitCamera;
use crate::config::ViewportConfig;
use crate::mesh_asset::{DrawStatus, MeshAsset};
use crate::reaction::{Reaction, reaction_alpha, tint_for};

pub const CLEAR_DARK: [f32; 3] = [0.05, 0.05, 0.06];
pub const CLEAR_LIGHT: [f32; 3] = [0.22, 0.22, 0.26];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyVariant {
    Male,
    Female,
    Medical,
}

impl BodyVariant {
    /// First letter decides: `m` male, `f` female. Medical has no tag and is
    /// reached through `select_variant`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('m') => Some(Self::Male),
            Some('f') => Some(Self::Female),
            _ => None,
        }
    }

    /// Exact, case-insensitive variant name as written by `as_str`.
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Male, Self::Female, Self::Medical]
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Medical => "medical",
        }
    }
}

/// What one `render_frame` call did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Status of the active mesh; anything but `Drawn` means the placeholder
    /// was drawn instead.
    pub mesh: DrawStatus,
    /// Index of the background frame drawn, if any.
    pub background_frame: Option<usize>,
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ActiveSlot {
    Variant(BodyVariant),
    Loaded,
}

pub struct ViewportController<B: FrameBackend> {
    cfg: ViewportConfig,
    variants: HashMap<BodyVariant, MeshAsset<B::Mesh>>,
    /// Mesh loaded by path; replaced (and released) on every new load.
    loaded: Option<MeshAsset<B::Mesh>>,
    active: Option<ActiveSlot>,
    camera: OrbitCamera,
    background: BackgroundAnimation<B::Texture>,
    reaction: Option<Reaction>,
    dark_background: bool,
    redraw: bool,
}

impl<B: FrameBackend> ViewportController<B> {
    pub fn new(cfg: ViewportConfig) -> Self {
        Self {
            camera: OrbitCamera::new(&cfg),
            background: BackgroundAnimation::new(cfg.frame_delay),
            cfg,
            variants: HashMap::new(),
            loaded: None,
            active: None,
            reaction: None,
            dark_background: true,
            redraw: true,
        }
    }

    // ---- meshes ----

    /// Load a variant's mesh so switching to it later is instant.
    pub fn preload_variant(&mut self, variant: BodyVariant, path: &Path) -> Result<(), AssetError> {
        let asset = MeshAsset::try_load(path)?;
        self.insert_variant(variant, asset);
        Ok(())
    }

    /// Install an already parsed variant, replacing (and releasing) any previous one.
    pub fn insert_variant(&mut self, variant: BodyVariant, asset: MeshAsset<B::Mesh>) {
        self.variants.insert(variant, asset);
        if self.active == Some(ActiveSlot::Variant(variant)) {
            self.redraw = true;
        }
    }

    pub fn has_variant(&self, variant: BodyVariant) -> bool {
        self.variants.contains_key(&variant)
    }

    /// Switch to a pre-loaded variant by tag. Unknown tags and variants that
    /// were never loaded are ignored. Returns true when the active mesh changed.
    pub fn set_gender_model(&mut self, tag: &str) -> bool {
        let Some(variant) = BodyVariant::from_tag(tag) else {
            log::warn!("unknown model variant tag {tag:?}");
            return false;
        };
        self.select_variant(variant)
    }

    pub fn select_variant(&mut self, variant: BodyVariant) -> bool {
        if !self.variants.contains_key(&variant) {
            log::warn!("model variant {} is not loaded", variant.as_str());
            return false;
        }
        if self.active == Some(ActiveSlot::Variant(variant)) {
            return false;
        }
        self.active = Some(ActiveSlot::Variant(variant));
        self.loaded = None;
        self.redraw = true;
        log::info!("active model: {}", variant.as_str());
        true
    }

    /// Swap male and female. Anything else (including no active variant)
    /// goes to male.
    pub fn toggle_gender_model(&mut self) -> bool {
        let next = match self.active_variant() {
            Some(BodyVariant::Male) => BodyVariant::Female,
            _ => BodyVariant::Male,
        };
        self.select_variant(next)
    }

    pub fn active_variant(&self) -> Option<BodyVariant> {
        match self.active {
            Some(ActiveSlot::Variant(v)) => Some(v),
            _ => None,
        }
    }

    /// Load `path` and make it the active mesh. On error the previous mesh
    /// stays active; the error is returned for information only.
    pub fn set_active_mesh(&mut self, path: &Path) -> Result<(), AssetError> {
        match MeshAsset::try_load(path) {
            Ok(asset) => {
                self.set_active_asset(asset);
                Ok(())
            }
            Err(e) => {
                log::warn!("keeping current model: {e}");
                Err(e)
            }
        }
    }

    /// Make an asset parsed elsewhere the active mesh.
    pub fn set_active_asset(&mut self, asset: MeshAsset<B::Mesh>) {
        log::info!("active model: {}", asset.path().display());
        self.loaded = Some(asset);
        self.active = Some(ActiveSlot::Loaded);
        self.redraw = true;
    }

    /// Map a 0..=100 layer slider onto the catalogue's layer models and load
    /// the result. Returns Ok(false) when the slider stays on the same model.
    pub fn set_model_layer(&mut self, catalog: &ModelCatalog, value: u8) -> Result<bool, AssetError> {
        let Some(path) = catalog.layer_for_slider(value) else {
            return Ok(false);
        };
        if self.active == Some(ActiveSlot::Loaded)
            && self.loaded.as_ref().is_some_and(|a| a.path() == path)
        {
            return Ok(false);
        }
        self.set_active_mesh(path)?;
        Ok(true)
    }

    pub fn active_asset(&self) -> Option<&MeshAsset<B::Mesh>> {
        match self.active? {
            ActiveSlot::Variant(v) => self.variants.get(&v),
            ActiveSlot::Loaded => self.loaded.as_ref(),
        }
    }

    fn active_asset_mut(&mut self) -> Option<&mut MeshAsset<B::Mesh>> {
        match self.active? {
            ActiveSlot::Variant(v) => self.variants.get_mut(&v),
            ActiveSlot::Loaded => self.loaded.as_mut(),
        }
    }

    // ---- reaction ----

    /// Start the pulse for `id`, or clear it for `None` / `""`.
    pub fn apply_reaction(&mut self, id: Option<&str>, now: Instant) {
        self.reaction = match id {
            Some(id) if !id.is_empty() => Some(Reaction { id: id.to_string(), since: now }),
            _ => None,
        };
        self.redraw = true;
    }

    pub fn reaction(&self) -> Option<&Reaction> {
        self.reaction.as_ref()
    }

    pub fn reaction_alpha(&self, now: Instant) -> f32 {
        reaction_alpha(self.reaction.as_ref(), now)
    }

    // ---- input ----

    pub fn drag_start(&mut self, x: f32) {
        self.camera.drag_start(x);
    }

    pub fn drag_move(&mut self, x: f32) {
        if self.camera.drag_move(x) {
            self.redraw = true;
        }
    }

    pub fn drag_end(&mut self) {
        self.camera.drag_end();
    }

    pub fn scroll(&mut self, notches: f32) {
        if self.camera.scroll(notches) {
            self.redraw = true;
        }
    }

    pub fn double_click(&mut self) {
        self.dark_background = !self.dark_background;
        self.redraw = true;
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
        self.redraw = true;
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn yaw_deg(&self) -> f32 {
        self.camera.yaw_deg()
    }

    pub fn zoom(&self) -> f32 {
        self.camera.zoom()
    }

    pub fn dark_background(&self) -> bool {
        self.dark_background
    }

    pub fn clear_color(&self) -> [f32; 3] {
        if self.dark_background { CLEAR_DARK } else { CLEAR_LIGHT }
    }

    // ---- background ----

    pub fn set_background_frames(&mut self, frames: Vec<B::Texture>, now: Instant) {
        self.background.set_frames(frames, now);
        self.redraw = true;
    }

    pub fn clear_background(&mut self) {
        self.background.clear();
        self.redraw = true;
    }

    /// Decode an animated GIF and upload every frame. On any failure the
    /// background is left empty (solid clear colour). Returns the frame count.
    pub fn load_background(&mut self, backend: &mut B, path: &Path, now: Instant) -> usize {
        let frames = match load_gif_frames(path) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("background disabled: {e}");
                self.clear_background();
                return 0;
            }
        };
        let mut uploaded = Vec::with_capacity(frames.len());
        for (i, frame) in frames.iter().enumerate() {
            match backend.upload_texture(&format!("bg-frame-{i}"), frame) {
                Ok(t) => uploaded.push(t),
                Err(e) => {
                    log::error!("background {}: frame {i}: {e}", path.display());
                    self.clear_background();
                    return 0;
                }
            }
        }
        log::info!("background loaded: {} ({} frames)", path.display(), uploaded.len());
        let n = uploaded.len();
        self.set_background_frames(uploaded, now);
        n
    }

    pub fn background_frame_count(&self) -> usize {
        self.background.len()
    }

    pub fn background_frame_index(&self) -> usize {
        self.background.index()
    }

    // ---- frame ----

    /// Draw one frame: background, then the active mesh with the camera and
    /// reaction tint, falling back to the placeholder. Never fails.
    pub fn render_frame(&mut self, backend: &mut B, now: Instant) -> FrameReport {
        self.background.advance(now);
        let background_frame = match self.background.current() {
            Some(tex) => {
                backend.draw_background(tex);
                Some(self.background.index())
            }
            None => {
                backend.clear(self.clear_color());
                None
            }
        };

        let alpha = self.reaction_alpha(now);
        let params = DrawParams { model_view: self.camera.model_view(), tint: tint_for(alpha) };
        let mesh = match self.active_asset_mut() {
            Some(asset) => asset.render(backend, &params),
            None => DrawStatus::Empty,
        };
        if mesh != DrawStatus::Drawn {
            backend.draw_placeholder(&params);
        }
        FrameReport { mesh, background_frame, alpha }
    }

    /// Returns and clears the pending redraw flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.cfg
    }
}
