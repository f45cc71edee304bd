//! FlixDesk - a frameless desktop shell for Netflix
//!
//! One borderless window holding two webviews: our own title bar page drawn
//! behind everything, and the content view below the title bar.

mod dialogs;
mod host;
mod ipc;
mod platform;

use anyhow::Context;
use flixdesk_chrome::placement;
use flixdesk_chrome::{ChromeController, TitleBarPress, WindowHost};
use flixdesk_core::config::WindowConfig;
use flixdesk_core::settings::ToggleOutcome;
use flixdesk_core::types::{Point, Size};
use flixdesk_core::{
    AccelerationSetting, AccelerationToggle, JsonSettingsStore, ShellConfig, ShellError,
};
use flixdesk_guard::{NavigationDecision, NavigationGuard, NewWindowDecision};
use flixdesk_presence::{Activity, DiscordPeer, PresenceReporter, PresenceTracker};
use host::TaoWindowHost;
use ipc::IpcMessage;
use std::sync::Arc;
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wry::{PageLoadEvent, Rect, WebContext, WebView, WebViewBuilder};

const DEFAULT_LOG_FILTER: &str = "info,discord_rich_presence=warn";

#[derive(Debug, Clone)]
enum UserEvent {
    /// Message from the title bar view
    TitleBar(IpcMessage),
    /// Message from the content view
    Content(IpcMessage),
    /// Load a URL in the content view
    Navigate(String),
    /// The content view finished loading a document
    PageLoaded(String),
}

fn init_logging() -> anyhow::Result<()> {
    tracing_log::LogTracer::init().context("Failed to set log tracer")?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Metrics in physical pixels for the controller; style metrics stay logical
fn physical_metrics(config: &WindowConfig, scale: f64) -> WindowConfig {
    WindowConfig {
        default_size: Size::new(config.default_size.width * scale, config.default_size.height * scale),
        drag_grab_offset: config.drag_grab_offset * scale,
        ..config.clone()
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("Starting FlixDesk {}", env!("CARGO_PKG_VERSION"));

    let config = ShellConfig::load_or_default();
    let guard = match NavigationGuard::from_config(&config) {
        Ok(guard) => guard,
        Err(e) => {
            warn!("Invalid navigation config, using defaults: {}", e);
            NavigationGuard::from_config(&ShellConfig::default())?
        }
    };
    let guard = Arc::new(guard);

    let store = JsonSettingsStore::for_namespace(&config.settings.namespace);
    info!("Settings stored at {:?}", store.path());
    let mut acceleration = AccelerationToggle::load(AccelerationSetting::new(store, &config.settings));
    info!("Hardware acceleration: {}", acceleration.is_enabled());

    let mut presence = if config.presence.enabled {
        Some(PresenceReporter::start(
            DiscordPeer::new(config.presence.application_id.clone()),
            PresenceTracker::new(&config.presence),
        ))
    } else {
        info!("Presence disabled");
        None
    };

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(LogicalSize::new(
            config.window.default_size.width,
            config.window.default_size.height,
        ))
        .with_decorations(false)
        .with_transparent(true)
        .build(&event_loop)
        .context("Failed to create window")?;

    platform::init_window_frame(&window);

    let mut controller = ChromeController::new(physical_metrics(&config.window, window.scale_factor()));

    {
        let mut host = TaoWindowHost::new(&window, None, None);
        let monitor = host.current_monitor();
        let centered = placement::centered_default(
            monitor.as_ref(),
            host.bounds(),
            controller.metrics().default_size,
        );
        host.set_bounds(centered);
    }

    if let Err(e) = std::fs::create_dir_all(&config.user_data_dir) {
        warn!("Failed to create user data folder {:?}: {}", config.user_data_dir, e);
    }
    let mut web_context = WebContext::new(Some(config.user_data_dir.clone()));
    let browser_arguments = acceleration.browser_arguments();
    if !browser_arguments.is_empty() {
        info!("Browser arguments: {}", browser_arguments);
    }

    let chrome_view = match build_title_bar(&window, &mut web_context, browser_arguments, proxy.clone()) {
        Ok(view) => Some(view),
        Err(e) => {
            error!("Failed to create title bar view: {}", e);
            window.set_decorations(true);
            None
        }
    };

    let content_view = match build_content(
        &window,
        &mut web_context,
        browser_arguments,
        &config,
        Arc::clone(&guard),
        proxy.clone(),
    ) {
        Ok(view) => Some(view),
        Err(e) => {
            error!("Failed to create content view: {}", e);
            dialogs::show_error(
                &config.window.title,
                &format!("Failed to initialize WebView: {}", e),
            );
            None
        }
    };

    if content_view.is_some() {
        if let Some(presence) = &presence {
            presence.report(Activity::startup());
        }
    }

    let title = config.window.title.clone();
    let window_config = config.window.clone();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        // Keep the web context alive as long as the views.
        let _ = &web_context;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                end_session(presence.take());
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::ScaleFactorChanged { scale_factor, .. },
                ..
            } => {
                controller.set_metrics(physical_metrics(&window_config, scale_factor));
                let mut host = TaoWindowHost::new(&window, chrome_view.as_ref(), content_view.as_ref());
                controller.on_window_state_changed(&mut host);
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                let mut host = TaoWindowHost::new(&window, chrome_view.as_ref(), content_view.as_ref());
                controller.on_window_state_changed(&mut host);
            }

            Event::UserEvent(UserEvent::TitleBar(message)) => {
                let mut host = TaoWindowHost::new(&window, chrome_view.as_ref(), content_view.as_ref());
                match message {
                    IpcMessage::TitleBarReady => {
                        controller.on_window_state_changed(&mut host);
                        sync_acceleration(chrome_view.as_ref(), acceleration.is_enabled());
                    }
                    IpcMessage::TitleBarPress {
                        click_count,
                        screen_x,
                        screen_y,
                        local_x,
                    } => {
                        let scale = window.scale_factor();
                        // Page coordinates are CSS pixels; prefer the OS cursor.
                        let screen = window
                            .cursor_position()
                            .map(|p| Point::new(p.x, p.y))
                            .unwrap_or_else(|_| Point::new(screen_x * scale, screen_y * scale));
                        let press = TitleBarPress {
                            click_count,
                            screen,
                            local_x: local_x * scale,
                        };
                        controller.on_title_bar_press(&mut host, press);
                    }
                    IpcMessage::WindowMinimize => controller.on_minimize_requested(&mut host),
                    IpcMessage::WindowToggleMaximize => controller.on_maximize_toggle_requested(&mut host),
                    IpcMessage::WindowClose => {
                        end_session(presence.take());
                        *control_flow = ControlFlow::Exit;
                    }
                    IpcMessage::ToggleHardwareAcceleration => {
                        let enabled = acceleration.begin_toggle();
                        sync_acceleration(chrome_view.as_ref(), enabled);

                        let outcome = if dialogs::confirm_restart(&title, enabled) {
                            acceleration.confirm()
                        } else {
                            acceleration.decline()
                        };
                        match outcome {
                            ToggleOutcome::Restart => {
                                info!("Restarting to apply hardware acceleration = {}", enabled);
                                end_session(presence.take());
                                if let Err(e) = relaunch() {
                                    error!("Failed to restart: {}", e);
                                }
                                *control_flow = ControlFlow::Exit;
                            }
                            ToggleOutcome::Reverted => {
                                sync_acceleration(chrome_view.as_ref(), acceleration.is_enabled());
                            }
                            ToggleOutcome::Idle => {}
                        }
                    }
                    IpcMessage::FullscreenChanged { active } => {
                        controller.on_fullscreen_changed(&mut host, active);
                    }
                }
            }

            Event::UserEvent(UserEvent::Content(message)) => {
                if let IpcMessage::FullscreenChanged { active } = message {
                    let mut host = TaoWindowHost::new(&window, chrome_view.as_ref(), content_view.as_ref());
                    controller.on_fullscreen_changed(&mut host, active);
                }
            }

            Event::UserEvent(UserEvent::Navigate(url)) => {
                if let Some(content) = &content_view {
                    if let Err(e) = content.load_url(&url) {
                        warn!("Failed to load {}: {}", url, e);
                    }
                }
            }

            Event::UserEvent(UserEvent::PageLoaded(url)) => {
                if let Some(presence) = &presence {
                    presence.report_url(&url);
                }
            }

            Event::MainEventsCleared => {
                if controller.has_pending() {
                    let mut host = TaoWindowHost::new(&window, chrome_view.as_ref(), content_view.as_ref());
                    controller.run_pending(&mut host);
                }
            }

            _ => {}
        }
    })
}

fn full_window_rect(window: &Window) -> Rect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    Rect {
        position: tao::dpi::LogicalPosition::new(0, 0).into(),
        size: LogicalSize::new(size.width, size.height).into(),
    }
}

/// Both views share one user data folder, so they must also share browser arguments.
fn webview_builder<'a>(web_context: &'a mut WebContext, browser_arguments: &str) -> WebViewBuilder<'a> {
    platform::with_browser_arguments(WebViewBuilder::with_web_context(web_context), browser_arguments)
}

fn build_title_bar(
    window: &Window,
    web_context: &mut WebContext,
    browser_arguments: &str,
    proxy: EventLoopProxy<UserEvent>,
) -> Result<WebView, ShellError> {
    webview_builder(web_context, browser_arguments)
        .with_html(ipc::TITLE_BAR_HTML)
        .with_transparent(true)
        .with_bounds(full_window_rect(window))
        .with_ipc_handler(move |request| {
            if let Some(message) = IpcMessage::parse(request.body()) {
                let _ = proxy.send_event(UserEvent::TitleBar(message));
            }
        })
        .build_as_child(window)
        .map_err(|e| ShellError::webview(e.to_string()))
}

fn build_content(
    window: &Window,
    web_context: &mut WebContext,
    browser_arguments: &str,
    config: &ShellConfig,
    guard: Arc<NavigationGuard>,
    proxy: EventLoopProxy<UserEvent>,
) -> Result<WebView, ShellError> {
    let ipc_proxy = proxy.clone();
    let navigation_proxy = proxy.clone();
    let navigation_guard = Arc::clone(&guard);
    let new_window_proxy = proxy.clone();
    let load_proxy = proxy;

    let scale = window.scale_factor();
    let size = window.inner_size().to_logical::<f64>(scale);
    let title_bar_height = config.window.title_bar_height.min(size.height);

    webview_builder(web_context, browser_arguments)
        .with_url(guard.home().as_str())
        .with_bounds(Rect {
            position: tao::dpi::LogicalPosition::new(0.0, title_bar_height).into(),
            size: LogicalSize::new(size.width, size.height - title_bar_height).into(),
        })
        .with_initialization_script(ipc::FULLSCREEN_BRIDGE)
        .with_ipc_handler(move |request| {
            let Some(message) = IpcMessage::parse(request.body()) else {
                return;
            };
            if message.allowed_from_content() {
                let _ = ipc_proxy.send_event(UserEvent::Content(message));
            } else {
                warn!("Ignoring {:?} from content view", message);
            }
        })
        .with_navigation_handler(move |url| match navigation_guard.check_navigation(&url) {
            NavigationDecision::Allow => true,
            NavigationDecision::Redirect(home) => {
                let _ = navigation_proxy.send_event(UserEvent::Navigate(home.to_string()));
                false
            }
        })
        .with_new_window_req_handler(move |url| {
            if let NewWindowDecision::LoadInPlace(target) = guard.check_new_window(&url) {
                let _ = new_window_proxy.send_event(UserEvent::Navigate(target));
            }
            false
        })
        .with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Finished = event {
                let _ = load_proxy.send_event(UserEvent::PageLoaded(url));
            }
        })
        .build_as_child(window)
        .map_err(|e| ShellError::webview(e.to_string()))
}

fn sync_acceleration(chrome: Option<&WebView>, enabled: bool) {
    if let Some(chrome) = chrome {
        if let Err(e) = chrome.evaluate_script(&ipc::acceleration_script(enabled)) {
            tracing::debug!("Failed to update acceleration indicator: {}", e);
        }
    }
}

fn end_session(presence: Option<PresenceReporter>) {
    if let Some(presence) = presence {
        presence.shutdown();
    }
    info!("Session ended");
}

fn relaunch() -> std::io::Result<()> {
    let exe = std::env::current_exe()?;
    std::process::Command::new(exe)
        .args(std::env::args_os().skip(1))
        .spawn()?;
    Ok(())
}
