//! Resident list window content.
//!
//! Renders the same [`ViewBody`] as the terminal front end. Backend requests
//! run on the tokio runtime; results are applied back on the UI thread via
//! `cx.spawn`. Responses arriving after the panel is dropped are ignored.
//! While a modal is open the page underneath receives no mouse input.

use std::sync::Arc;
use std::time::Duration;

use gpui::{
    div, prelude::*, px, rgba, Animation, AnimationExt, AnyElement, ClickEvent, Context,
    FontWeight, IntoElement, MouseButton, MouseDownEvent, MouseMoveEvent, ParentElement, Render,
    SharedString, Styled, Window,
};

use crate::app::{Prompt, PromptState, ResidentsListState, ViewBody};
use crate::domain::{Resident, ResidentId};
use crate::services::{ApiError, ResidentsApi};
use crate::ui::components::{button, ButtonVariant};
use crate::ui::table::{BACK_LABEL, COLUMNS, DELETE_LABEL, DELETING_LABEL, EMPTY_TEXT, LOADING_TEXT, TITLE};

/// Callback type for the back-to-dashboard control.
type OnNavigateCallback = Box<dyn Fn(&str) + 'static>;

/// Column widths in pixels, matching [`COLUMNS`].
const COLUMN_WIDTHS: [f32; 5] = [180.0, 240.0, 260.0, 140.0, 100.0];

const SPINNER_FRAMES: [&str; 4] = ["\u{25D0}", "\u{25D3}", "\u{25D1}", "\u{25D2}"];

pub struct ResidentsPanel {
    state: ResidentsListState,
    api: Arc<dyn ResidentsApi>,
    runtime: tokio::runtime::Handle,
    dashboard_route: SharedString,
    prompts: PromptState,
    on_navigate: Option<OnNavigateCallback>,
}

impl ResidentsPanel {
    /// Create the panel and start loading the collection.
    pub fn new(
        api: Arc<dyn ResidentsApi>,
        runtime: tokio::runtime::Handle,
        dashboard_route: impl Into<SharedString>,
        cx: &mut Context<Self>,
    ) -> Self {
        let mut panel = Self {
            state: ResidentsListState::new(),
            api,
            runtime,
            dashboard_route: dashboard_route.into(),
            prompts: PromptState::new(),
            on_navigate: None,
        };
        panel.load(cx);
        panel
    }

    /// Set the callback for the back-to-dashboard control.
    pub fn on_navigate(&mut self, callback: impl Fn(&str) + 'static) {
        self.on_navigate = Some(Box::new(callback));
    }

    fn load(&mut self, cx: &mut Context<Self>) {
        self.state.begin_load();
        tracing::info!(event = "ui.residents.load_started");

        let api = self.api.clone();
        let request = self.runtime.spawn(async move { api.list_residents().await });

        cx.spawn(async move |this, cx: &mut gpui::AsyncApp| {
            let result = request.await.unwrap_or_else(|e| Err(ApiError::from(e)));

            if let Err(e) = this.update(cx, |view, cx| {
                match view.state.finish_load(result) {
                    Ok(count) => tracing::info!(event = "ui.residents.load_completed", count),
                    Err(err) => tracing::error!(event = "ui.residents.load_failed", error = %err),
                }
                cx.notify();
            }) {
                tracing::debug!(event = "ui.residents.load_view_dropped", error = ?e);
            }
        })
        .detach();
    }

    fn on_delete_click(&mut self, id: ResidentId, cx: &mut Context<Self>) {
        if let Err(rejected) = self.prompts.request_delete(&self.state, id) {
            tracing::debug!(event = "ui.residents.delete_ignored", id = %id, reason = %rejected);
            return;
        }
        cx.notify();
    }

    fn on_cancel_delete(&mut self, cx: &mut Context<Self>) {
        if let Some(id) = self.prompts.cancel() {
            tracing::info!(event = "ui.residents.delete_declined", id = %id);
        }
        cx.notify();
    }

    fn on_confirm_delete(&mut self, cx: &mut Context<Self>) {
        let id = match self.prompts.confirm(&mut self.state) {
            Ok(id) => id,
            Err(rejected) => {
                tracing::debug!(event = "ui.residents.delete_ignored", reason = %rejected);
                cx.notify();
                return;
            }
        };
        tracing::info!(event = "ui.residents.delete_started", id = %id);
        cx.notify();

        let api = self.api.clone();
        let request = self
            .runtime
            .spawn(async move { api.delete_resident(id).await });

        cx.spawn(async move |this, cx: &mut gpui::AsyncApp| {
            let result = request.await.unwrap_or_else(|e| Err(ApiError::from(e)));

            if let Err(e) = this.update(cx, |view, cx| {
                match view.prompts.finish_delete(&mut view.state, id, result) {
                    Ok(()) => tracing::info!(event = "ui.residents.delete_completed", id = %id),
                    Err(err) => {
                        tracing::error!(event = "ui.residents.delete_failed", id = %id, error = %err)
                    }
                }
                cx.notify();
            }) {
                tracing::debug!(event = "ui.residents.delete_view_dropped", id = %id, error = ?e);
            }
        })
        .detach();
    }

    fn on_dismiss_alert(&mut self, cx: &mut Context<Self>) {
        self.prompts.dismiss_alert();
        cx.notify();
    }

    fn on_back_click(&mut self, _cx: &mut Context<Self>) {
        tracing::info!(event = "ui.residents.navigate", route = %self.dashboard_route);
        if let Some(callback) = &self.on_navigate {
            callback(&self.dashboard_route);
        }
    }

    fn render_loading(&self) -> impl IntoElement {
        div()
            .mt(px(24.0))
            .flex()
            .justify_center()
            .items_center()
            .gap(px(8.0))
            .child(
                div()
                    .text_xl()
                    .text_color(rgba(0x1A5F7AFF))
                    .with_animation(
                        "residents-loading-spinner",
                        Animation::new(Duration::from_millis(800)).repeat(),
                        |spinner, delta| {
                            let frame = ((delta * SPINNER_FRAMES.len() as f32) as usize)
                                .min(SPINNER_FRAMES.len() - 1);
                            spinner.child(SPINNER_FRAMES[frame])
                        },
                    ),
            )
            .child(div().text_color(rgba(0x000000FF)).child(LOADING_TEXT))
    }

    fn render_error(&self, message: &str) -> impl IntoElement {
        div()
            .mt(px(24.0))
            .p(px(16.0))
            .rounded(px(6.0))
            .border_1()
            .border_color(rgba(0xFECACAFF))
            .bg(rgba(0xFEF2F2FF))
            .text_color(rgba(0xB91C1CFF))
            .child(SharedString::from(message.to_string()))
    }

    fn render_empty(&self) -> impl IntoElement {
        div()
            .mt(px(24.0))
            .p(px(16.0))
            .rounded(px(6.0))
            .border_1()
            .border_color(rgba(0xE5E7EBFF))
            .bg(rgba(0xF9FAFBFF))
            .text_color(rgba(0x374151FF))
            .child(EMPTY_TEXT)
    }

    fn render_table(&self, residents: &[Resident], cx: &Context<Self>) -> impl IntoElement {
        let header = div()
            .flex()
            .bg(rgba(0xF3F4F6FF))
            .border_b_1()
            .border_color(rgba(0xE5E7EBFF))
            .children(COLUMNS.iter().zip(COLUMN_WIDTHS).map(|(label, width)| {
                div()
                    .w(px(width))
                    .py(px(12.0))
                    .px(px(16.0))
                    .text_sm()
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(rgba(0x111827FF))
                    .child(*label)
            }));

        div()
            .id("residents-table")
            .mt(px(24.0))
            .flex()
            .flex_col()
            .overflow_x_scroll()
            .bg(rgba(0xFFFFFFFF))
            .border_1()
            .border_color(rgba(0xE5E7EBFF))
            .child(header)
            .children(
                residents
                    .iter()
                    .map(|resident| self.render_row(resident, cx)),
            )
    }

    fn render_row(&self, resident: &Resident, cx: &Context<Self>) -> impl IntoElement {
        let id = resident.id;
        let pending = self.state.is_delete_pending(id);
        let cells = [
            resident.display_name(),
            resident.display_email(),
            resident.display_address(),
            resident.display_phone(),
        ];

        let delete = button(
            SharedString::from(format!("delete-{}", id)),
            if pending { DELETING_LABEL } else { DELETE_LABEL },
            ButtonVariant::Danger,
            pending,
        )
        .when(!pending, |b| {
            b.on_click(cx.listener(move |this, _: &ClickEvent, _, cx| {
                this.on_delete_click(id, cx);
            }))
        });

        div()
            .id(SharedString::from(format!("resident-{}", id)))
            .flex()
            .items_center()
            .border_b_1()
            .border_color(rgba(0xE5E7EBFF))
            .hover(|d| d.bg(rgba(0xF9FAFBFF)))
            .children(cells.into_iter().zip(COLUMN_WIDTHS).map(|(text, width)| {
                div()
                    .w(px(width))
                    .py(px(16.0))
                    .px(px(16.0))
                    .text_sm()
                    .text_color(rgba(0x111827FF))
                    .truncate()
                    .child(SharedString::from(text.to_string()))
            }))
            .child(div().w(px(COLUMN_WIDTHS[4])).px(px(16.0)).child(delete))
    }

    fn render_modal(
        &self,
        message: SharedString,
        actions: Vec<AnyElement>,
        cx: &Context<Self>,
    ) -> impl IntoElement {
        let block_mouse_move = cx.listener(|_, _: &MouseMoveEvent, _, cx| {
            cx.stop_propagation();
        });
        let block_mouse_down = cx.listener(|_, _: &MouseDownEvent, _, cx| {
            cx.stop_propagation();
        });

        div()
            .id("residents-modal-backdrop")
            .absolute()
            .inset_0()
            .bg(rgba(0x00000080))
            .on_mouse_move(block_mouse_move)
            .on_mouse_down(MouseButton::Left, block_mouse_down)
            .flex()
            .items_center()
            .justify_center()
            .child(
                div()
                    .id("residents-modal")
                    .w(px(400.0))
                    .p(px(20.0))
                    .bg(rgba(0xFFFFFFFF))
                    .rounded(px(8.0))
                    .shadow_lg()
                    .flex()
                    .flex_col()
                    .gap(px(16.0))
                    .child(div().text_color(rgba(0x111827FF)).child(message))
                    .child(div().flex().justify_end().gap(px(8.0)).children(actions)),
            )
    }

    fn render_confirm(&self, message: &str, cx: &Context<Self>) -> impl IntoElement {
        let actions = vec![
            button("confirm-cancel", "Cancel", ButtonVariant::Ghost, false)
                .on_click(cx.listener(|this, _: &ClickEvent, _, cx| this.on_cancel_delete(cx)))
                .into_any_element(),
            button("confirm-delete", DELETE_LABEL, ButtonVariant::Danger, false)
                .on_click(cx.listener(|this, _: &ClickEvent, _, cx| this.on_confirm_delete(cx)))
                .into_any_element(),
        ];
        self.render_modal(SharedString::from(message.to_string()), actions, cx)
    }

    fn render_alert(&self, message: &str, cx: &Context<Self>) -> impl IntoElement {
        let actions = vec![button("alert-ok", "OK", ButtonVariant::Primary, false)
            .on_click(cx.listener(|this, _: &ClickEvent, _, cx| this.on_dismiss_alert(cx)))
            .into_any_element()];
        self.render_modal(SharedString::from(message.to_string()), actions, cx)
    }
}

impl Render for ResidentsPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let body = match self.state.body() {
            ViewBody::Loading => self.render_loading().into_any_element(),
            ViewBody::Error(message) => self.render_error(message).into_any_element(),
            ViewBody::Empty => self.render_empty().into_any_element(),
            ViewBody::Table(residents) => self.render_table(residents, cx).into_any_element(),
        };

        let back = button(
            "back-to-dashboard",
            BACK_LABEL,
            ButtonVariant::Primary,
            false,
        )
        .on_click(cx.listener(|this, _: &ClickEvent, _, cx| this.on_back_click(cx)));

        div()
            .id("residents-page")
            .relative()
            .size_full()
            .bg(rgba(0xF9FAFBFF))
            .p(px(24.0))
            .flex()
            .flex_col()
            .child(
                div()
                    .text_3xl()
                    .font_weight(FontWeight::BOLD)
                    .text_color(rgba(0x000000FF))
                    .child(TITLE),
            )
            .child(body)
            .child(div().mt(px(24.0)).child(back))
            .when_some(self.prompts.current(), |d, prompt| match prompt {
                Prompt::ConfirmDelete { message, .. } => {
                    d.child(self.render_confirm(message, cx).into_any_element())
                }
                Prompt::Alert(message) => {
                    d.child(self.render_alert(message, cx).into_any_element())
                }
            })
    }
}
