//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. On macOS
//! `meta` is ⌘; elsewhere `ctrl` plays the same role.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolDraw,
    ToolMove,
    /// Swap between the current and previous tool.
    ToggleLastTool,

    // ── Edit ──
    Undo,
    Redo,
    Clear,

    // ── File ──
    /// Download the flattened surface. Performed by the host.
    Export,
}

impl ShortcutAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutAction::ToolDraw => "toolDraw",
            ShortcutAction::ToolMove => "toolMove",
            ShortcutAction::ToggleLastTool => "toggleLastTool",
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::Clear => "clear",
            ShortcutAction::Export => "export",
        }
    }
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, shift: bool, _alt: bool, meta: bool) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "s" | "S" => Some(ShortcutAction::Export),
                "Delete" | "Backspace" => Some(ShortcutAction::Clear),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        match key {
            "d" | "D" | "b" | "B" => Some(ShortcutAction::ToolDraw),
            "v" | "V" | "m" | "M" => Some(ShortcutAction::ToolMove),
            "Tab" => Some(ShortcutAction::ToggleLastTool),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tool_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("d", false, false, false, false),
            Some(ShortcutAction::ToolDraw)
        );
        assert_eq!(
            ShortcutMap::resolve("b", false, false, false, false),
            Some(ShortcutAction::ToolDraw)
        );
        assert_eq!(
            ShortcutMap::resolve("v", false, false, false, false),
            Some(ShortcutAction::ToolMove)
        );
        assert_eq!(
            ShortcutMap::resolve("m", false, false, false, false),
            Some(ShortcutAction::ToolMove)
        );
        assert_eq!(
            ShortcutMap::resolve("Tab", false, false, false, false),
            Some(ShortcutAction::ToggleLastTool)
        );
    }

    #[test]
    fn resolve_undo_redo() {
        // Cmd+Z → Undo
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(ShortcutAction::Undo)
        );
        // Ctrl+Z → Undo
        assert_eq!(
            ShortcutMap::resolve("z", true, false, false, false),
            Some(ShortcutAction::Undo)
        );
        // Cmd+Shift+Z → Redo
        assert_eq!(
            ShortcutMap::resolve("Z", false, true, false, true),
            Some(ShortcutAction::Redo)
        );
        // Ctrl+Y → Redo
        assert_eq!(
            ShortcutMap::resolve("y", true, false, false, false),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn resolve_clear_and_export() {
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, true),
            Some(ShortcutAction::Clear)
        );
        assert_eq!(
            ShortcutMap::resolve("s", true, false, false, false),
            Some(ShortcutAction::Export)
        );
        // Plain Delete is not bound: clearing needs the modifier.
        assert_eq!(ShortcutMap::resolve("Delete", false, false, false, false), None);
    }

    #[test]
    fn unbound_keys_resolve_to_none() {
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("d", false, true, false, false), None);
        assert_eq!(ShortcutMap::resolve("x", false, false, false, true), None);
    }
}
