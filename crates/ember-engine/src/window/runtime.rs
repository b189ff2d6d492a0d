use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::event::{EventDispatcher, WindowCloseEvent, WindowResizeEvent};
use crate::input::{subscribe_input, InputState, SharedInput};
use crate::paint::Color;
use crate::time::FrameClock;

use super::shim::WindowShim;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Initial client size in physical pixels.
    pub width: u32,
    pub height: u32,
    /// Initial `FrameCtx::clear_color`.
    pub clear_color: Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ember sandbox".to_string(),
            width: 800,
            height: 600,
            clear_color: Color::rgb(0.33, 0.33, 0.33),
        }
    }
}

/// Requests an app can make during a frame.
///
/// Commands are buffered and applied after `on_update` returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    SetTitle(String),
    Exit,
}

/// The application loop.
///
/// Owns the event dispatcher and the input cache. `new` installs the default
/// subscribers:
/// - WindowResize: logs the new size
/// - WindowClose: logs and raises the close flag that stops the loop
/// - key/button/cursor kinds: drive the input cache (see [`subscribe_input`])
///
/// On focus loss the runtime forwards a release event for every held key and
/// button, so the cache and any replacement subscribers see them.
///
/// Use [`dispatcher_mut`](Self::dispatcher_mut) before `run` to add or replace
/// subscriptions. Replacing WindowClose without raising the close flag keeps
/// the window open; see [`close_flag`](Self::close_flag).
pub struct Runtime {
    config: RuntimeConfig,
    dispatcher: EventDispatcher,
    input: SharedInput,
    close_requested: Rc<Cell<bool>>,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        let input = InputState::shared();
        let close_requested = Rc::new(Cell::new(false));
        let mut dispatcher = EventDispatcher::new();

        dispatcher.subscribe(|e: &WindowResizeEvent| {
            log::info!("[WindowResized] {}x{}", e.width, e.height);
        });

        let close = close_requested.clone();
        dispatcher.subscribe(move |_: &WindowCloseEvent| {
            log::info!("[WindowClose] close requested");
            close.set(true);
        });

        subscribe_input(&mut dispatcher, input.clone());

        Self {
            config,
            dispatcher,
            input,
            close_requested,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    /// Handle to the input cache the default subscribers write to.
    pub fn input(&self) -> SharedInput {
        self.input.clone()
    }

    /// The flag the default WindowClose subscriber raises. Setting it stops the loop.
    pub fn close_flag(&self) -> Rc<Cell<bool>> {
        self.close_requested.clone()
    }

    /// Opens the window and runs until the window is closed or the app exits.
    pub fn run<A>(self, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        log::info!("starting application");

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let clear_color = self.config.clear_color;
        let mut state = AppState {
            config: self.config,
            gpu_init,
            app,
            dispatcher: Some(self.dispatcher),
            input: self.input,
            close_requested: self.close_requested,
            clear_color,
            entry: None,
            exit_requested: false,
            error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        log::info!("closing application");

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    shim: WindowShim,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    /// Moved into the shim callback when the window is created.
    dispatcher: Option<EventDispatcher>,
    input: SharedInput,
    close_requested: Rc<Cell<bool>>,
    clear_color: Color,

    entry: Option<WindowEntry>,
    exit_requested: bool,

    /// First fatal error; returned from `Runtime::run`.
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        log::info!(
            "creating window \"{}\" size {}x{}",
            self.config.title,
            self.config.width,
            self.config.height
        );

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let mut dispatcher = self
            .dispatcher
            .take()
            .context("window already created")?;
        let shim = WindowShim::new(move |event| dispatcher.dispatch(&event));

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            shim,
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
            .try_build()
            .context("GPU initialization failed")?;

        let viewport = entry.with_gpu(|gpu| gpu.viewport());
        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);

        self.app.on_start(viewport);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.request_exit(event_loop);
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            self.exit_requested = true;
            self.app.on_exit();
        }
        event_loop.exit();
    }

    /// Drives one frame: tick, update, apply commands.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else { return };

        let app = &mut self.app;
        let clear_color = &mut self.clear_color;
        let input = self.input.borrow();
        let mut runtime_ctx = RuntimeCtx::default();

        let control = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let mut ctx = FrameCtx {
                input: &input,
                time,
                clear_color: *clear_color,
                runtime: &mut runtime_ctx,
                window: fields.window,
                gpu: fields.gpu,
            };

            let control = app.on_update(&mut ctx);
            *clear_color = ctx.clear_color;
            control
        });
        drop(input);

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }

        for cmd in runtime_ctx.commands.drain(..) {
            match cmd {
                Command::SetTitle(title) => {
                    if let Some(entry) = self.entry.as_ref() {
                        entry.with_window(|w| w.set_title(&title));
                    }
                }
                Command::Exit => self.request_exit(event_loop),
            }
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw: one update per loop iteration, after all events.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else { return };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        match &event {
            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::Resized(size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(size.width, size.height));
                entry.with_shim_mut(|shim| shim.handle(&event));
            }

            WindowEvent::Focused(false) => {
                let input = &self.input;
                entry.with_shim_mut(|shim| shim.release_held(input));
            }

            WindowEvent::Occluded(false) => {
                // Frames may have stopped while hidden; don't report the gap as dt.
                entry.with_clock_mut(|clock| clock.reset());
            }

            _ => {
                entry.with_shim_mut(|shim| shim.handle(&event));
            }
        }

        if self.close_requested.get() {
            self.request_exit(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Drop the GPU surface before the window goes away with the event loop.
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::event::{Event, KeyPressedEvent, KeyReleasedEvent, MouseButtonPressedEvent};
    use crate::input::{KeyCode, MouseButtonCode};

    #[test]
    fn default_config_matches_sandbox_defaults() {
        let cfg = RuntimeConfig::default();
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert_eq!(cfg.clear_color, Color::rgb(0.33, 0.33, 0.33));
    }

    #[test]
    fn default_subscribers_cover_every_kind() {
        let mut runtime = Runtime::new(RuntimeConfig::default());
        for kind in crate::event::EventKind::ALL {
            assert!(runtime.dispatcher_mut().is_subscribed(kind), "{kind} not subscribed");
        }
    }

    #[test]
    fn close_event_raises_flag() {
        let mut runtime = Runtime::new(RuntimeConfig::default());
        let flag = runtime.close_flag();

        runtime.dispatcher_mut().dispatch(&WindowCloseEvent.into());
        assert!(flag.get());

        // Dispatcher keeps working after close.
        let ev: Event = KeyPressedEvent { key: KeyCode::W, repeated: false }.into();
        runtime.dispatcher_mut().dispatch(&ev);
        assert!(runtime.input().borrow().is_key_pressed(KeyCode::W));
    }

    #[test]
    fn focus_loss_releases_reach_replaced_subscriber() {
        let mut runtime = Runtime::new(RuntimeConfig::default());
        let input = runtime.input();
        let released = Rc::new(RefCell::new(Vec::new()));

        let r = released.clone();
        let state = input.clone();
        runtime.dispatcher_mut().subscribe(move |e: &KeyReleasedEvent| {
            r.borrow_mut().push(e.key);
            state.borrow_mut().release_key(e.key);
        });

        let mut dispatcher = runtime.dispatcher;
        dispatcher.dispatch(&KeyPressedEvent { key: KeyCode::W, repeated: false }.into());
        dispatcher.dispatch(
            &MouseButtonPressedEvent { button: MouseButtonCode::Left, x: 3.0, y: 4.0 }.into(),
        );
        let mut shim = WindowShim::new(move |event| dispatcher.dispatch(&event));

        assert_eq!(shim.release_held(&input), 2);

        assert_eq!(*released.borrow(), vec![KeyCode::W]);
        let state = input.borrow();
        assert!(!state.is_key_pressed(KeyCode::W));
        assert!(!state.is_mouse_button_pressed(MouseButtonCode::Left));
    }

    #[test]
    fn shim_forwarding_reaches_runtime_dispatcher() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let input = runtime.input();
        let flag = runtime.close_flag();

        let mut dispatcher = runtime.dispatcher;
        let mut shim = WindowShim::new(move |event| dispatcher.dispatch(&event));

        shim.handle(&WindowEvent::Resized(PhysicalSize::new(1024, 768)));
        shim.handle(&WindowEvent::CloseRequested);

        assert!(flag.get());
        assert!(input.borrow().pressed_keys().next().is_none());
    }
}
