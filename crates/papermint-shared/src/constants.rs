/// Application name
pub const APP_NAME: &str = "Papermint";

/// Maximum number of files a processing session may hold
pub const MAX_SESSION_FILES: usize = 10;

/// Simulated processing delay in milliseconds
pub const PROCESSING_DELAY_MS: u64 = 3_000;

/// Stagger between consecutive artifact downloads in milliseconds
pub const DOWNLOAD_STAGGER_MS: u64 = 500;

/// Simulated size of a processed file, as a percentage of the input size
pub const SIMULATED_SIZE_RATIO_PERCENT: u64 = 80;

/// Prefix applied to every processed artifact name
pub const PROCESSED_NAME_PREFIX: &str = "processed_";

/// Storage key holding the currently signed-in user
pub const KEY_CURRENT_USER: &str = "user";

/// Storage key prefix for a user's coin balance (`coins_<userId>`)
pub const KEY_COINS_PREFIX: &str = "coins_";

/// Storage key prefix for a user's transaction log (`transactions_<userId>`)
pub const KEY_TRANSACTIONS_PREFIX: &str = "transactions_";

/// File extensions accepted by the intake allow-list (lowercase, no dot)
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "png", "jpg", "jpeg", "gif", "bmp", "tiff",
];

/// Avatar service used for generated profile pictures
pub const AVATAR_SERVICE_URL: &str = "https://ui-avatars.com/api/";
