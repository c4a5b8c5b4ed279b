/// Symbolic mouse cursor shapes a backend can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Pointer,
    Text,
    Crosshair,
    AllScroll,
    /// Horizontal resize.
    ResizeEw,
    /// Vertical resize.
    ResizeNs,
    ResizeNesw,
    ResizeNwse,
    NotAllowed,
    /// Hide the cursor.
    None,
}
