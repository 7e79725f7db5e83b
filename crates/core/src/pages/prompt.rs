/// Blocking dialogs shown to the user (the browser's `confirm` / `alert`).
pub trait UserPrompt {
    /// Ask a yes/no question. `false` means the user cancelled.
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}
