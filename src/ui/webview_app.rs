//! WebView-based browser shell using `wry` + `tao`.
//!
//! Architecture:
//! - Every content surface is its own `wry::WebView` inside a `tao` window;
//!   only the active one is visible.
//! - `with_initialization_script(BRIDGE_JS)` injects the bridge on every
//!   page. The welcome page is served over the `chromini://` custom protocol
//!   with the bridge inlined, since initialization scripts do not run on
//!   custom-protocol pages on Windows WebView2.
//! - Every wry/tao callback becomes a `UserEvent`, and the event loop calls
//!   exactly one `App` method per event.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Fullscreen, Window, WindowBuilder};
use wry::http::{Request, Response};
use wry::{NewWindowResponse, PageLoadEvent, Rect, WebContext, WebView, WebViewBuilder};

use super::hotkeys::GlobalHotkeys;
use crate::app::App;
use crate::host::{
    EditCommand, SurfaceBackend, SurfaceRequest, WindowBackend, WindowHost, WindowOptions,
};
use crate::ipc_handler::handle_message;
use crate::platform;
use crate::types::config::WebPreferences;
use crate::types::errors::HostError;
use crate::types::surface::{SurfaceId, SurfaceKind};
use crate::types::window::{Bounds, WindowBounds, WindowId};

const BRIDGE_JS: &str = include_str!("../../resources/ui/bridge.js");
const WELCOME_HTML: &str = include_str!("../../resources/ui/welcome.html");

/// Host callbacks, delivered on the event loop thread.
#[derive(Debug)]
pub enum UserEvent {
    Ipc { surface: SurfaceId, body: String },
    NewWindowRequested { surface: SurfaceId, url: String },
    PageLoad { surface: SurfaceId, url: String, finished: bool },
    TitleChanged { surface: SurfaceId, title: String },
    Hotkey(u32),
}

fn welcome_html() -> String {
    WELCOME_HTML.replace("{{bridge}}", BRIDGE_JS)
}

fn protocol_response(request: Request<Vec<u8>>) -> Response<Cow<'static, [u8]>> {
    let (status, body) = match request.uri().path() {
        "/" | "/welcome" => (200, welcome_html()),
        other => {
            log::debug!("No internal page at {}", other);
            (404, String::from("Not found"))
        }
    };
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Cow::Owned(body.into_bytes()))
        .unwrap_or_else(|_| Response::new(Cow::Borrowed(&[][..])))
}

fn to_rect(bounds: Bounds) -> Rect {
    Rect {
        position: wry::dpi::LogicalPosition::new(bounds.x, bounds.y).into(),
        size: wry::dpi::LogicalSize::new(bounds.width, bounds.height).into(),
    }
}

// ─── Host implementation ───

/// Window factory bound to the running event loop.
struct TaoHost<'a> {
    target: &'a EventLoopWindowTarget<UserEvent>,
    proxy: &'a EventLoopProxy<UserEvent>,
    web_context: &'a Rc<RefCell<WebContext>>,
    window_ids: &'a mut HashMap<tao::window::WindowId, WindowId>,
}

impl WindowHost for TaoHost<'_> {
    fn create_window(
        &mut self,
        id: WindowId,
        options: &WindowOptions,
    ) -> Result<Box<dyn WindowBackend>, HostError> {
        let window = WindowBuilder::new()
            .with_title(&options.title)
            .with_inner_size(LogicalSize::new(options.size.width, options.size.height))
            .with_min_inner_size(LogicalSize::new(400, 300))
            .build(self.target)
            .map_err(|e| HostError::WindowCreation(e.to_string()))?;

        self.window_ids.insert(window.id(), id);
        Ok(Box::new(TaoWindow {
            window: Rc::new(window),
            proxy: self.proxy.clone(),
            web_context: Rc::clone(self.web_context),
        }))
    }

    fn open_external(&mut self, url: &str) -> Result<(), HostError> {
        open::that(url).map_err(|e| HostError::OpenExternal {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

struct TaoWindow {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    web_context: Rc<RefCell<WebContext>>,
}

impl TaoWindow {
    fn logical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        (size.width.round() as u32, size.height.round() as u32)
    }

    fn builder<'a>(
        &self,
        web_context: &'a mut WebContext,
        request: &SurfaceRequest,
    ) -> WebViewBuilder<'a> {
        let id = request.id;
        let ipc_proxy = self.proxy.clone();
        let nw_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let title_proxy = self.proxy.clone();
        let devtools = request.kind == SurfaceKind::Page || request.preferences.devtools;

        let builder = WebViewBuilder::with_web_context(web_context)
            .with_bounds(to_rect(request.bounds))
            .with_visible(false)
            .with_devtools(devtools)
            .with_clipboard(true)
            .with_incognito(request.preferences.persistent_partition.is_none())
            .with_initialization_script(BRIDGE_JS)
            .with_custom_protocol("chromini".into(), move |_wv_id, request| {
                protocol_response(request)
            })
            .with_ipc_handler(move |msg: Request<String>| {
                let body = msg.body().clone();
                let _ = ipc_proxy.send_event(UserEvent::Ipc { surface: id, body });
            })
            .with_new_window_req_handler(move |url, _features| {
                let _ = nw_proxy.send_event(UserEvent::NewWindowRequested { surface: id, url });
                NewWindowResponse::Deny
            })
            .with_on_page_load_handler(move |event, url| {
                let finished = matches!(event, PageLoadEvent::Finished);
                let _ = load_proxy.send_event(UserEvent::PageLoad { surface: id, url, finished });
            })
            .with_document_title_changed_handler(move |title| {
                let _ = title_proxy.send_event(UserEvent::TitleChanged { surface: id, title });
            });

        #[cfg(target_os = "windows")]
        let builder = {
            use wry::WebViewBuilderExtWindows;
            if request.preferences.web_security {
                builder
            } else {
                builder.with_additional_browser_args("--disable-web-security")
            }
        };

        builder
    }
}

impl WindowBackend for TaoWindow {
    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn content_bounds(&self) -> Bounds {
        let (width, height) = self.logical_size();
        Bounds::filling(width, height)
    }

    fn size(&self) -> WindowBounds {
        let (width, height) = self.logical_size();
        WindowBounds { width, height }
    }

    fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.window
            .set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
    }

    fn create_surface(
        &mut self,
        request: &SurfaceRequest,
    ) -> Result<Box<dyn SurfaceBackend>, HostError> {
        let web_context = Rc::clone(&self.web_context);
        let mut web_context = web_context.borrow_mut();
        let builder = self.builder(&mut web_context, request);

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = self
                .window
                .default_vbox()
                .ok_or_else(|| HostError::SurfaceCreation("window has no GTK container".into()))?;
            builder.build_gtk(vbox)
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder.build_as_child(&*self.window);

        let webview = webview.map_err(|e| HostError::SurfaceCreation(e.to_string()))?;
        Ok(Box::new(WrySurface { webview }))
    }
}

struct WrySurface {
    webview: WebView,
}

impl WrySurface {
    fn eval(&self, script: &str) {
        if let Err(e) = self.webview.evaluate_script(script) {
            log::warn!("Script evaluation failed: {}", e);
        }
    }
}

impl SurfaceBackend for WrySurface {
    fn navigate(&mut self, url: &str) {
        if let Err(e) = self.webview.load_url(url) {
            log::warn!("Failed to load {}: {}", url, e);
        }
    }

    // wry has no cache-bypassing reload.
    fn reload(&mut self, _ignore_cache: bool) {
        if let Err(e) = self.webview.reload() {
            log::warn!("Reload failed: {}", e);
        }
    }

    fn go_back(&mut self) {
        self.eval("history.back();");
    }

    fn go_forward(&mut self) {
        self.eval("history.forward();");
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        if let Err(e) = self.webview.set_bounds(to_rect(bounds)) {
            log::debug!("set_bounds failed: {}", e);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if let Err(e) = self.webview.set_visible(visible) {
            log::debug!("set_visible failed: {}", e);
        }
        if visible {
            let _ = self.webview.focus();
        }
    }

    fn toggle_devtools(&mut self) {
        if self.webview.is_devtools_open() {
            self.webview.close_devtools();
        } else {
            self.webview.open_devtools();
        }
    }

    // The inspector cannot be pointed at a coordinate; opening it is the
    // closest wry offers.
    fn inspect_element(&mut self, _x: i32, _y: i32) {
        self.webview.open_devtools();
    }

    fn edit(&mut self, command: EditCommand) {
        let name = match command {
            EditCommand::Cut => "cut",
            EditCommand::Copy => "copy",
            EditCommand::Paste => "paste",
        };
        self.eval(&format!("document.execCommand('{}');", name));
    }

    fn push(&mut self, message: &str) {
        self.eval(&format!(
            "window.__chromini && window.__chromini.receive({});",
            message
        ));
    }

    fn destroy(self: Box<Self>) {
        let _ = self.webview.set_visible(false);
    }
}

/// Drops host-window mappings whose window never made it into the
/// registry, e.g. when its welcome surface could not be created.
fn forget_unregistered<K>(window_ids: &mut HashMap<K, WindowId>, app: &App) {
    window_ids.retain(|_, id| app.tab_manager.contains_window(*id));
}

// ─── Main entry point ───

fn create_web_context(preferences: &WebPreferences) -> WebContext {
    match preferences.partition_dir_name() {
        Some(name) => WebContext::new(Some(platform::get_partition_dir(&name))),
        None => WebContext::new(None),
    }
}

pub fn run() {
    let preferences = WebPreferences::default();
    let mut app = App::new(None, preferences.clone());

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();
    let web_context = Rc::new(RefCell::new(create_web_context(&preferences)));
    let mut window_ids: HashMap<tao::window::WindowId, WindowId> = HashMap::new();

    let mut hotkeys = match GlobalHotkeys::new(proxy.clone()) {
        Ok(mut hotkeys) => {
            app.register_shortcuts(&mut hotkeys);
            Some(hotkeys)
        }
        Err(e) => {
            log::warn!("Global shortcuts unavailable: {}", e);
            None
        }
    };

    {
        let mut host = TaoHost {
            target: &event_loop,
            proxy: &proxy,
            web_context: &web_context,
            window_ids: &mut window_ids,
        };
        if let Err(e) = app.open_window(&mut host, None) {
            log::error!("Could not create the main window: {}", e);
            std::process::exit(1);
        }
    }

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        let mut host = TaoHost {
            target,
            proxy: &proxy,
            web_context: &web_context,
            window_ids: &mut window_ids,
        };

        match event {
            Event::WindowEvent { window_id, event, .. } => {
                let Some(window) = host.window_ids.get(&window_id).copied() else {
                    return;
                };
                match event {
                    WindowEvent::CloseRequested => {
                        host.window_ids.remove(&window_id);
                        match app.close_window(window) {
                            Ok(backend) => drop(backend),
                            Err(e) => log::warn!("Close of {} failed: {}", window, e),
                        }
                        if app.window_count() == 0 && !cfg!(target_os = "macos") {
                            hotkeys.take();
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                    WindowEvent::Focused(focused) => app.focus_changed(window, focused),
                    WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                        app.window_resized(window)
                    }
                    _ => {}
                }
            }

            Event::Reopen { .. } => {
                if app.window_count() == 0 {
                    if let Err(e) = app.open_window(&mut host, None) {
                        log::error!("Could not reopen a window: {}", e);
                        forget_unregistered(&mut *host.window_ids, &app);
                    }
                }
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::Ipc { surface, body } => {
                    if let Err(e) = handle_message(&mut app, &mut host, surface, &body) {
                        log::warn!("Bridge message from {} rejected: {}", surface, e);
                        forget_unregistered(&mut *host.window_ids, &app);
                    }
                }
                UserEvent::NewWindowRequested { surface, url } => {
                    if let Err(e) = app.new_window_requested(&mut host, surface, &url) {
                        log::warn!("New-window request for {} failed: {}", url, e);
                    }
                }
                UserEvent::PageLoad { surface, url, finished: false } => {
                    app.navigation_started(surface, &url)
                }
                UserEvent::PageLoad { surface, url, finished: true } => {
                    app.load_finished(surface, &url)
                }
                UserEvent::TitleChanged { surface, title } => app.title_changed(surface, &title),
                UserEvent::Hotkey(id) => {
                    let Some(keys) = hotkeys
                        .as_ref()
                        .and_then(|h| h.chord_for(id))
                        .map(str::to_string)
                    else {
                        return;
                    };
                    if let Err(e) = app.dispatch_chord(&mut host, &keys) {
                        log::warn!("Shortcut {} failed: {}", keys, e);
                        forget_unregistered(&mut *host.window_ids, &app);
                    }
                }
            },

            _ => {}
        }
    });
}
