// Constants for the stack container

/// Number of slots allocated when no capacity is given
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Fraction of the current capacity added on each growth step
/// Growth is additive-relative: 10 -> 17 -> 28 -> 47 -> 79 -> 134 -> ...
pub const DEFAULT_STRETCH_RATIO: f64 = 0.7;

/// Smallest number of slots a growth step may add
/// Keeps a zero-capacity buffer (e.g. after `clear`) able to accept pushes
pub const MIN_STRETCH: usize = 1;

/// Largest capacity a script's `stack` declaration may request
pub const MAX_SCRIPT_CAPACITY: usize = 1_000_000;

/// Largest repeat count accepted by a script's `pull <n>`
pub const MAX_PULL_COUNT: usize = 100_000;
