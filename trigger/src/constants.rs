//! Provider error codes and default user-facing texts.

/// Provider error code reported when the user dismisses the popup.
pub const POPUP_CLOSED_BY_USER: &str = "auth/popup-closed-by-user";

/// Provider error code reported when the browser refuses to open the popup.
pub const POPUP_BLOCKED: &str = "auth/popup-blocked";

/// Notice shown when the user dismissed the popup.
pub const CANCELLED_NOTICE: &str = "Sign-in was cancelled";

/// Notice shown when the popup was blocked.
pub const BLOCKED_NOTICE: &str = "Popup was blocked by browser";

/// Notice shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_NOTICE: &str = "Google login failed";

/// Notice shown when the session request never produced a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Notice shown when the backend answered success with an unreadable body.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Button label while idle.
pub const IDLE_LABEL: &str = "Continue with Google";

/// Button label while an attempt (or the session store) is loading.
pub const LOADING_LABEL: &str = "Signing in...";

/// Default backend path that exchanges a credential for a session.
pub const DEFAULT_LOGIN_PATH: &str = "/api/auth/google";

/// Default timeout for the backend session call, in seconds.
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 30;
