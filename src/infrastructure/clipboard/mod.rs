//! Clipboard infrastructure module
//!
//! Bridges the clipboard through the platform's copy/paste programs
//! (pbcopy/pbpaste, wl-clipboard, xclip, xsel, clip.exe).

mod command;
mod detect;

pub use command::CommandClipboard;
pub use detect::{
    create_clipboard, detect_clipboard_tool, platform_candidates, select_tool, ClipboardTool,
};
