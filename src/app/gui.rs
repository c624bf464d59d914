use std::sync::Arc;

use anyhow::Result;
use gpui::{
    actions, px, size, AppContext, Application, Bounds, KeyBinding, SharedString, TitlebarOptions,
    WindowBounds, WindowOptions,
};

use crate::config::AppConfig;
use crate::services::ResidentsApi;
use crate::ui::table::TITLE;
use crate::ui::ResidentsPanel;

actions!(residents_admin, [Quit]);

/// Main application entry point
pub struct App;

impl App {
    /// Open the resident list window and run until it is closed.
    ///
    /// Backend requests are spawned on `runtime`; gpui owns the main thread.
    pub fn run(
        config: &AppConfig,
        api: Arc<dyn ResidentsApi>,
        runtime: tokio::runtime::Handle,
    ) -> Result<()> {
        let dashboard_route = SharedString::from(config.ui.dashboard_route.clone());

        Application::new().run(move |cx: &mut gpui::App| {
            cx.bind_keys([
                KeyBinding::new("cmd-q", Quit, None),
                KeyBinding::new("ctrl-q", Quit, None),
            ]);
            cx.on_action(|_: &Quit, cx| cx.quit());

            let bounds = Bounds::centered(None, size(px(1000.0), px(640.0)), cx);
            let opened = cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    titlebar: Some(TitlebarOptions {
                        title: Some(SharedString::from(TITLE)),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                move |_window, cx| {
                    cx.new(|cx| {
                        let mut panel =
                            ResidentsPanel::new(api, runtime, dashboard_route, cx);
                        panel.on_navigate(|route| {
                            tracing::info!(event = "ui.navigate_requested", route);
                        });
                        panel
                    })
                },
            );

            if let Err(e) = opened {
                tracing::error!(event = "ui.window_open_failed", error = %e);
                cx.quit();
            }
        });

        Ok(())
    }
}
