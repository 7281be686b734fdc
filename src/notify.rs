/// How loudly the host should surface a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// User-notification seam. The core reports severity and text; the host
/// decides presentation (dialog, console line, toast).
pub trait NotificationSink {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Sink that drops everything. Handy for tests and headless runs.
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl NotificationSink for SilentNotifier {
    fn notify(&mut self, _severity: Severity, _message: &str) {}
}
