use crate::audio::ChimePlayer;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom::{self, Subscription};
use crate::render::{self, FrameScene};
use crate::{overlay, scroll};
use folio_core::assets::{LoadKind, LoadProgress, LoadState};
use folio_core::camera::Camera;
use folio_core::constants::DPR_MIN;
use folio_core::driver::CameraRig;
use folio_core::loading::{LoadingGate, Phase};
use folio_core::perf::PerfMonitor;
use folio_core::scene::{Instance, SceneManifest};
use folio_core::scroll::ScrollProgress;
use folio_core::stage::{build_stage, FloatMotion};
use folio_core::timeline::Act;
use folio_core::viewport::Classification;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub window: web::Window,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub scroll_root: web::Element,

    pub rig: Rc<RefCell<CameraRig>>,
    pub scroll: ScrollProgress,
    pub gate: Rc<RefCell<LoadingGate>>,
    pub progress: Rc<RefCell<LoadProgress>>,
    pub subject: Rc<RefCell<LoadState<SceneManifest>>>,
    pub perf: PerfMonitor,
    pub canvas_dirty: Rc<Cell<bool>>,

    pub gpu: Option<render::GpuState<'a>>,
    pub stars: Vec<Instance>,
    pub float: FloatMotion,

    // Kept alive for the page lifetime.
    pub chime: Option<Rc<RefCell<ChimePlayer>>>,
    pub subscriptions: Vec<Subscription>,

    pub started_at: Instant,
    pub last_instant: Instant,

    stage_key: Option<(Classification, LoadKind)>,
    stage_base: Vec<Instance>,
    stage: Vec<Instance>,
    last_act: Option<Act>,
    last_phase: Phase,
    last_percent: Option<f32>,
}

impl<'a> FrameContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        window: web::Window,
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        scroll_root: web::Element,
        rig: Rc<RefCell<CameraRig>>,
        gate: Rc<RefCell<LoadingGate>>,
        progress: Rc<RefCell<LoadProgress>>,
        subject: Rc<RefCell<LoadState<SceneManifest>>>,
        canvas_dirty: Rc<Cell<bool>>,
        gpu: Option<render::GpuState<'a>>,
        stars: Vec<Instance>,
    ) -> Self {
        let now = Instant::now();
        Self {
            window,
            document,
            canvas,
            scroll_root,
            rig,
            scroll: ScrollProgress::default(),
            gate,
            progress,
            subject,
            perf: PerfMonitor::default(),
            canvas_dirty,
            gpu,
            stars,
            float: FloatMotion::default(),
            chime: None,
            subscriptions: Vec::new(),
            started_at: now,
            last_instant: now,
            stage_key: None,
            stage_base: Vec::new(),
            stage: Vec::new(),
            last_act: None,
            last_phase: Phase::Booting,
            last_percent: None,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let elapsed = (now - self.started_at).as_secs_f32();

        self.update_loading(elapsed);

        if let Some(change) = self.perf.record(dt_sec) {
            log::info!("[perf] {:?}, dpr now {:.2}", change, self.perf.dpr());
            self.canvas_dirty.set(true);
        }
        if self.canvas_dirty.replace(false) {
            let dpr = dom::clamped_dpr(&self.window, DPR_MIN, self.perf.dpr());
            let (w, h) = dom::sync_canvas_backing_size(&self.canvas, dpr);
            if let Some(g) = &mut self.gpu {
                g.resize_if_needed(w, h);
            }
        }

        let offset = self
            .scroll
            .update(scroll::read_offset(&self.scroll_root), dt_sec);
        let (camera_state, act, classification) = {
            let mut rig = self.rig.borrow_mut();
            rig.frame(offset);
            (
                *rig.camera(),
                rig.driver().current_act(),
                rig.classification().unwrap_or(Classification::Desktop),
            )
        };
        if act != self.last_act {
            overlay::set_act(&self.document, act);
            self.last_act = act;
        }

        self.update_stage(classification, elapsed);

        if let Some(g) = &mut self.gpu {
            let (w, h) = g.size();
            let camera = Camera::from_state(&camera_state, w as f32 / h.max(1) as f32);
            let scene = FrameScene {
                view_proj: camera.view_projection(),
                camera_pos: camera.eye,
                stage: &self.stage,
                stars: &self.stars,
                time: elapsed,
            };
            match g.render(&scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    fn update_loading(&mut self, elapsed: f32) {
        let percent = self.progress.borrow().percent();
        if self.last_percent != Some(percent) {
            overlay::set_progress(&self.document, percent);
            self.last_percent = Some(percent);
        }
        let phase = self.gate.borrow_mut().tick(elapsed, percent);
        if phase != self.last_phase {
            if phase == Phase::Ready {
                overlay::reveal_enter_button(&self.document);
            }
            log::info!("[loading] {:?} -> {:?} at {:.2}s", self.last_phase, phase, elapsed);
            self.last_phase = phase;
        }
    }

    /// Re-flatten only when the classification or subject load state moved;
    /// the float transform is applied every frame on top.
    fn update_stage(&mut self, classification: Classification, elapsed: f32) {
        let key = (classification, self.subject.borrow().kind());
        if self.stage_key != Some(key) {
            self.stage_base = build_stage(classification, &self.subject.borrow());
            self.stage_key = Some(key);
            log::debug!("[stage] {:?}: {} instances", key, self.stage_base.len());
        }
        let motion = self.float.matrix(elapsed);
        self.stage.clear();
        self.stage.extend(self.stage_base.iter().map(|i| Instance {
            model: motion * i.model,
            ..*i
        }));
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type RafSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &RafSlot) {
    let Some(window) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame error: {:?}", e);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: RafSlot = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
