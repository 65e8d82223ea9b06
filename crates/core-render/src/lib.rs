//! Rendering: ANSI-safe string primitives, viewport scroll state, per-row
//! rendering of the text area, status line composition, and batched
//! terminal output.
//!
//! Pipeline per frame:
//! 1. `Viewport::adjust_scroll` has already run for the last action.
//! 2. `render::RenderContext::render_rows` produces exactly `height` rows of
//!    exactly `width` visible cells each (styled strings).
//! 3. `status::build_status` produces the status line text.
//! 4. `writer::Writer::paint` positions rows, status and message line and
//!    `flush` emits them in one write.
//!
//! Styling is always an explicit `Theme` / `SyntaxTheme` value handed down by
//! the caller.

pub mod ansi;
pub mod render;
pub mod status;
pub mod theme;
pub mod viewport;
pub mod writer;

pub use render::RenderContext;
pub use status::{StatusContext, build_status};
pub use theme::Theme;
pub use viewport::{GUTTER_WIDTH, Viewport};
pub use writer::{Frame, Writer};
