#![allow(dead_code)]

pub use procsync_test_utils::builders;
pub use procsync_test_utils::fake_lock;
pub use procsync_test_utils::{init_tracing, with_timeout};
