//! Button component.

use gpui::{div, prelude::*, px, rgba, Div, ElementId, SharedString, Stateful};

/// Button visual variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Navigation and neutral actions.
    #[default]
    Primary,
    /// Destructive actions such as delete.
    Danger,
    /// Cancel/dismiss.
    Ghost,
}

impl ButtonVariant {
    fn colors(self) -> (u32, u32, u32) {
        // (background, hover background, text)
        match self {
            ButtonVariant::Primary => (0x1E3A8AFF, 0x1E40AFFF, 0xFFFFFFFF),
            ButtonVariant::Danger => (0xDC2626FF, 0xB91C1CFF, 0xFFFFFFFF),
            ButtonVariant::Ghost => (0xE5E7EBFF, 0xD1D5DBFF, 0x111827FF),
        }
    }
}

/// A clickable button. Attach a handler with `.on_click(...)` unless disabled.
pub fn button(
    id: impl Into<ElementId>,
    label: impl Into<SharedString>,
    variant: ButtonVariant,
    disabled: bool,
) -> Stateful<Div> {
    let (bg, hover_bg, text) = variant.colors();
    let label: SharedString = label.into();

    div()
        .id(id)
        .px(px(12.0))
        .py(px(4.0))
        .rounded(px(4.0))
        .text_xs()
        .text_color(rgba(text))
        .when(!disabled, |d| {
            d.bg(rgba(bg))
                .cursor_pointer()
                .hover(|d| d.bg(rgba(hover_bg)))
        })
        .when(disabled, |d| d.bg(rgba(0x9CA3AFFF)))
        .child(label)
}
