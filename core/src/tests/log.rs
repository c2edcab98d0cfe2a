#[test]
fn test_log_helpers_do_not_panic_without_logger() {
    crate::log::info("info");
    crate::log::warn("warn");
    crate::log::error("error");
    crate::log::debug("label", "debug");
    crate::log::state_summary(1, 12.5, 10, 100, false);
    crate::log::action("spin", "coins=1");
    crate::log::result(true, "ok");
    crate::log::result(false, "fail");
}
