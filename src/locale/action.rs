//! The outcome of locale dispatch for one request.

/// What the gateway does with a request after locale dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseAction {
    /// Forward the request unchanged.
    PassThrough,
    /// Forward the request with its path replaced. The query string is kept.
    Rewrite(String),
    /// Answer with a temporary redirect to this path. The query string is kept.
    Redirect(String),
}

impl ResponseAction {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseAction::PassThrough => "pass_through",
            ResponseAction::Rewrite(_) => "rewrite",
            ResponseAction::Redirect(_) => "redirect",
        }
    }
}
