/// Catalog snapshot served next to the page; tried before the public endpoint.
pub const BUNDLED_CATALOG_FILE: &str = "problems.json";
/// localStorage key remembering the colour theme.
pub const THEME_STORAGE_KEY: &str = "sortle-theme";
/// MIME type carrying the dragged problem id.
pub const DRAG_FORMAT: &str = "text/plain";

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load problems.";
pub const COPIED_MESSAGE: &str = "Result copied to clipboard!";

// Element ids in index.html.
pub const LOADING_ID: &str = "loading";
pub const GAME_ID: &str = "game";
pub const POOL_ID: &str = "pool";
pub const SLOTS_ID: &str = "slots";
pub const RESULT_ID: &str = "result";
pub const SUBMIT_ID: &str = "submit";
pub const RESET_ID: &str = "reset";
pub const SHARE_ID: &str = "share";
pub const THEME_ID: &str = "themeToggle";
pub const DATE_ID: &str = "date";
pub const ATTEMPT_ID: &str = "attempt";
