// tests/exit_code_properties.rs

mod common;
use crate::common::builders::exit_with;

use proptest::prelude::*;

use procsync::exec::{execute, CommandSpec, ExecOutcome, FailureKind};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn nonzero_exit_codes_are_reported_verbatim(code in 1u8..=255) {
        let outcome = runtime().block_on(execute(&exit_with(code)));
        prop_assert_eq!(outcome, ExecOutcome::Failed(FailureKind::NonZeroExit(code)));
    }

    #[test]
    fn relative_programs_never_spawn(name in "[a-z][a-z0-9_-]{0,12}", args in proptest::collection::vec(".*", 0..4)) {
        let spec = CommandSpec::new(name).args(args);
        let outcome = runtime().block_on(execute(&spec));
        prop_assert_eq!(outcome, ExecOutcome::Failed(FailureKind::InvalidCommand));
    }
}
