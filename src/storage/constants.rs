// Buffer related constants
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

// Progress related constants
// Controls how often progress is printed (in multiples of buffer size)
pub const PROGRESS_UPDATE_INTERVAL: u64 = 100;

// Filesystem default
pub const DEFAULT_FS_ROOT: &str = "./storage";
