use crate::Rect;

pub const TOGGLE_SIZE: f64 = 28.0;
pub const TOGGLE_GAP: f64 = 6.0;
pub const PANEL_HEADER_HEIGHT: f64 = 44.0;
pub const PANEL_ROW_HEIGHT: f64 = 32.0;
pub const PANEL_MAX_HEIGHT: f64 = 280.0;
pub const PANEL_MIN_WIDTH: f64 = 240.0;
pub const PANEL_MARGIN: f64 = 8.0;

/// Toggle square left of the action control, vertically centred on it.
pub fn toggle_rect(control: Rect) -> Rect {
    Rect::new(
        control.x - TOGGLE_GAP - TOGGLE_SIZE,
        control.y + (control.height - TOGGLE_SIZE) / 2.0,
        TOGGLE_SIZE,
        TOGGLE_SIZE,
    )
}

/// Panel sitting just above the composer, as wide as it, clamped to the viewport top.
pub fn panel_rect(composer: Rect, rows: usize) -> Rect {
    let height = (PANEL_HEADER_HEIGHT + rows as f64 * PANEL_ROW_HEIGHT).min(PANEL_MAX_HEIGHT);
    let y = (composer.y - PANEL_MARGIN - height).max(PANEL_MARGIN);
    Rect::new(composer.x, y, composer.width.max(PANEL_MIN_WIDTH), height)
}
