use std::fmt;

/// Status vocabulary of the authorize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeStatus {
    Authorized,
    Denied,
}

impl AuthorizeStatus {
    pub fn code(self) -> &'static str {
        match self {
            AuthorizeStatus::Authorized => "1",
            AuthorizeStatus::Denied => "2",
        }
    }
}

/// Status vocabulary of the capture call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    Captured,
    Denied,
}

impl CaptureStatus {
    pub fn code(self) -> &'static str {
        match self {
            CaptureStatus::Captured => "0",
            CaptureStatus::Denied => "2",
        }
    }
}

/// Status reported by an authorize call.
///
/// The processor answers authorize-and-capture cards with a code from the
/// capture vocabulary, so an authorize response can carry either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeCode {
    Authorize(AuthorizeStatus),
    Capture(CaptureStatus),
}

impl AuthorizeCode {
    pub fn code(self) -> &'static str {
        match self {
            AuthorizeCode::Authorize(status) => status.code(),
            AuthorizeCode::Capture(status) => status.code(),
        }
    }
}

impl fmt::Display for AuthorizeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for CaptureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
