//! Internal constants for diagram validation and rendering.

use std::time::Duration;

/// Participant count above which a diagram is considered complex.
pub const MAX_PARTICIPANTS: usize = 15;

/// Message count above which a diagram is considered complex.
pub const MAX_MESSAGES: usize = 50;

/// Default capacity of the validation-result cache.
pub const DEFAULT_VALIDATION_CACHE_ENTRIES: usize = 1000;

/// Default lifetime of a validation-result cache entry (5 minutes).
pub const DEFAULT_VALIDATION_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default capacity of the render-result cache.
pub const DEFAULT_RENDER_CACHE_ENTRIES: usize = 50;

/// Default HTTP timeout for Kroki requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
