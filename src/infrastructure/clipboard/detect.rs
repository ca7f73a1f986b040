//! Clipboard tool detection

use std::env;
use std::fmt;

use tracing::{debug, info, warn};

use crate::domain::clipboard::ClipboardCommand;
use crate::domain::config::ServerSettings;

use super::command::CommandClipboard;

/// Known pairs of clipboard-set/get programs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardTool {
    /// macOS: pbcopy / pbpaste
    Pasteboard,
    /// Wayland: wl-copy / wl-paste (wl-clipboard)
    WlClipboard,
    /// X11: xclip
    Xclip,
    /// X11: xsel
    Xsel,
    /// Windows: clip.exe / PowerShell Get-Clipboard
    Windows,
}

impl ClipboardTool {
    /// Command that replaces the clipboard with stdin
    pub fn copy_command(&self) -> ClipboardCommand {
        match self {
            Self::Pasteboard => ClipboardCommand::bare("pbcopy"),
            Self::WlClipboard => ClipboardCommand::bare("wl-copy"),
            Self::Xclip => ClipboardCommand::new("xclip", ["-selection", "clipboard", "-in"]),
            Self::Xsel => ClipboardCommand::new("xsel", ["--clipboard", "--input"]),
            Self::Windows => ClipboardCommand::bare("clip.exe"),
        }
    }

    /// Command that writes the clipboard to stdout
    pub fn paste_command(&self) -> ClipboardCommand {
        match self {
            Self::Pasteboard => ClipboardCommand::bare("pbpaste"),
            Self::WlClipboard => ClipboardCommand::new("wl-paste", ["--no-newline"]),
            Self::Xclip => ClipboardCommand::new("xclip", ["-selection", "clipboard", "-out"]),
            Self::Xsel => ClipboardCommand::new("xsel", ["--clipboard", "--output"]),
            Self::Windows => ClipboardCommand::new(
                "powershell",
                ["-NoProfile", "-Command", "Get-Clipboard"],
            ),
        }
    }
}

impl fmt::Display for ClipboardTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pasteboard => write!(f, "pbcopy/pbpaste"),
            Self::WlClipboard => write!(f, "wl-clipboard"),
            Self::Xclip => write!(f, "xclip"),
            Self::Xsel => write!(f, "xsel"),
            Self::Windows => write!(f, "clip.exe/powershell"),
        }
    }
}

/// Candidate tools for this platform, most preferred first.
///
/// `wayland` moves wl-clipboard ahead of the X11 tools.
pub fn platform_candidates(wayland: bool) -> Vec<ClipboardTool> {
    if cfg!(target_os = "macos") {
        vec![ClipboardTool::Pasteboard]
    } else if cfg!(windows) {
        vec![ClipboardTool::Windows]
    } else if wayland {
        vec![
            ClipboardTool::WlClipboard,
            ClipboardTool::Xclip,
            ClipboardTool::Xsel,
        ]
    } else {
        vec![
            ClipboardTool::Xclip,
            ClipboardTool::Xsel,
            ClipboardTool::WlClipboard,
        ]
    }
}

/// Check that both programs of a tool are on PATH
fn is_tool_available(tool: ClipboardTool) -> bool {
    let copy = tool.copy_command();
    let paste = tool.paste_command();
    which::which(copy.program()).is_ok() && which::which(paste.program()).is_ok()
}

/// Pick the first available tool from `candidates`.
///
/// Returns the first candidate with `false` when nothing is installed, so
/// callers still get a concrete program to report in errors.
pub fn select_tool<F>(candidates: &[ClipboardTool], available: F) -> Option<(ClipboardTool, bool)>
where
    F: Fn(ClipboardTool) -> bool,
{
    candidates
        .iter()
        .copied()
        .find(|tool| available(*tool))
        .map(|tool| (tool, true))
        .or_else(|| candidates.first().map(|tool| (*tool, false)))
}

/// Detect the clipboard tool for the running session
pub fn detect_clipboard_tool() -> ClipboardTool {
    let wayland = env::var_os("WAYLAND_DISPLAY").is_some_and(|v| !v.is_empty());
    let candidates = platform_candidates(wayland);
    debug!(?candidates, wayland, "Probing clipboard tools");

    match select_tool(&candidates, is_tool_available) {
        Some((tool, true)) => tool,
        Some((tool, false)) => {
            warn!(%tool, "No clipboard tool found on PATH; requests will fail until one is installed");
            tool
        }
        None => ClipboardTool::Pasteboard,
    }
}

/// Build the clipboard bridge for the given settings.
///
/// Explicit copy/paste commands win; detection only fills in what is unset.
pub fn create_clipboard(settings: &ServerSettings) -> CommandClipboard {
    let (copy, paste) = match (&settings.copy_command, &settings.paste_command) {
        (Some(copy), Some(paste)) => (copy.clone(), paste.clone()),
        (copy, paste) => {
            let tool = detect_clipboard_tool();
            (
                copy.clone().unwrap_or_else(|| tool.copy_command()),
                paste.clone().unwrap_or_else(|| tool.paste_command()),
            )
        }
    };

    info!(copy = %copy, paste = %paste, "Using clipboard programs");
    CommandClipboard::new(copy, paste).with_timeout(settings.timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasteboard_commands() {
        assert_eq!(ClipboardTool::Pasteboard.copy_command().to_string(), "pbcopy");
        assert_eq!(ClipboardTool::Pasteboard.paste_command().to_string(), "pbpaste");
    }

    #[test]
    fn wl_paste_strips_newline() {
        let paste = ClipboardTool::WlClipboard.paste_command();
        assert_eq!(paste.program(), "wl-paste");
        assert_eq!(paste.args(), ["--no-newline"]);
    }

    #[test]
    fn xclip_targets_clipboard_selection() {
        assert_eq!(
            ClipboardTool::Xclip.copy_command().to_string(),
            "xclip -selection clipboard -in"
        );
        assert_eq!(
            ClipboardTool::Xclip.paste_command().to_string(),
            "xclip -selection clipboard -out"
        );
    }

    #[test]
    #[cfg(all(unix, not(target_os = "macos")))]
    fn wayland_prefers_wl_clipboard() {
        assert_eq!(platform_candidates(true)[0], ClipboardTool::WlClipboard);
        assert_eq!(platform_candidates(false)[0], ClipboardTool::Xclip);
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn macos_uses_pasteboard() {
        assert_eq!(platform_candidates(false), vec![ClipboardTool::Pasteboard]);
    }

    #[test]
    fn select_tool_takes_first_available() {
        let candidates = [ClipboardTool::Xclip, ClipboardTool::Xsel];
        let picked = select_tool(&candidates, |tool| tool == ClipboardTool::Xsel);
        assert_eq!(picked, Some((ClipboardTool::Xsel, true)));
    }

    #[test]
    fn select_tool_falls_back_to_first_candidate() {
        let candidates = [ClipboardTool::WlClipboard, ClipboardTool::Xclip];
        let picked = select_tool(&candidates, |_| false);
        assert_eq!(picked, Some((ClipboardTool::WlClipboard, false)));
        assert_eq!(select_tool(&[], |_| true), None);
    }

    #[test]
    fn explicit_commands_skip_detection() {
        let settings = ServerSettings {
            copy_command: Some("my-copy".parse().unwrap()),
            paste_command: Some("my-paste --raw".parse().unwrap()),
            ..Default::default()
        };

        let bridge = create_clipboard(&settings);
        assert_eq!(bridge.copy_command().program(), "my-copy");
        assert_eq!(bridge.paste_command().to_string(), "my-paste --raw");
    }

    #[test]
    fn partial_override_keeps_explicit_side() {
        let settings = ServerSettings {
            paste_command: Some("my-paste".parse().unwrap()),
            ..Default::default()
        };

        let bridge = create_clipboard(&settings);
        assert_eq!(bridge.paste_command().program(), "my-paste");
        assert!(!bridge.copy_command().program().is_empty());
    }
}
