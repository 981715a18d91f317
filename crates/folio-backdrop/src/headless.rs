//! Renderer backend that draws nothing
//!
//! Records what it was asked to do. Used where no GPU is available (native
//! builds of the web app) and by tests asserting on draw activity.

use std::cell::RefCell;
use std::rc::Rc;

use folio_hal::{Host, HostError, LocalFuture, PixelSize};

use crate::frame::FrameState;
use crate::render::{EffectRenderer, RenderBackend, RenderSetup};

/// Activity counters shared by a backend and its renderers
#[derive(Clone, Debug, Default)]
pub struct HeadlessStats {
    pub created: usize,
    pub draws: usize,
    pub resizes: usize,
    pub releases: usize,
    pub last_frame: Option<FrameState>,
    pub last_setup: Option<RenderSetup>,
}

type CreateHook = Rc<dyn Fn()>;

#[derive(Clone, Default)]
pub struct HeadlessBackend {
    stats: Rc<RefCell<HeadlessStats>>,
    fail_create: Rc<RefCell<Option<HostError>>>,
    on_create: Rc<RefCell<Option<CreateHook>>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> HeadlessStats {
        self.stats.borrow().clone()
    }

    /// Make subsequent `create` calls fail with `err`
    pub fn fail_create(&self, err: Option<HostError>) {
        *self.fail_create.borrow_mut() = err;
    }

    /// Run `hook` when a create future is polled
    pub fn on_create(&self, hook: impl Fn() + 'static) {
        *self.on_create.borrow_mut() = Some(Rc::new(hook));
    }
}

impl<H: Host> RenderBackend<H> for HeadlessBackend {
    fn create(
        &self,
        _surface: &H::Surface,
        setup: RenderSetup,
    ) -> LocalFuture<Result<Box<dyn EffectRenderer>, HostError>> {
        let stats = Rc::clone(&self.stats);
        let failure = self.fail_create.borrow().clone();
        let hook = self.on_create.borrow().clone();
        Box::pin(async move {
            if let Some(hook) = hook {
                hook();
            }
            if let Some(err) = failure {
                return Err(err);
            }
            {
                let mut s = stats.borrow_mut();
                s.created += 1;
                s.last_setup = Some(setup.clone());
            }
            Ok(Box::new(HeadlessRenderer {
                stats,
                size: setup.size,
                released: false,
            }) as Box<dyn EffectRenderer>)
        })
    }
}

struct HeadlessRenderer {
    stats: Rc<RefCell<HeadlessStats>>,
    size: PixelSize,
    released: bool,
}

impl EffectRenderer for HeadlessRenderer {
    fn resize(&mut self, size: PixelSize) {
        self.size = size;
        self.stats.borrow_mut().resizes += 1;
    }

    fn draw(&mut self, frame: &FrameState) -> Result<(), HostError> {
        if self.released {
            return Err(HostError::Renderer("draw after release".to_string()));
        }
        let mut s = self.stats.borrow_mut();
        s.draws += 1;
        s.last_frame = Some(frame.clone());
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.stats.borrow_mut().releases += 1;
        }
    }
}
