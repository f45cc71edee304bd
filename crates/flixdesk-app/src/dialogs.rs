//! Native message boxes

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Ask whether to restart now so the acceleration change takes effect
pub fn confirm_restart(title: &str, enabled: bool) -> bool {
    let state = if enabled { "enabled" } else { "disabled" };
    let result = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(format!(
            "Hardware acceleration will be {}. The app needs to restart to apply this change.\n\nRestart now?",
            state
        ))
        .set_buttons(MessageButtons::YesNo)
        .show();

    matches!(result, MessageDialogResult::Yes)
}

pub fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
