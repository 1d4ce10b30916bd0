use std::fs;
use tempfile::TempDir;

use crate::logging::{log_info, log_warn, swap_log_file, write_failure_reported};

#[test]
fn test_unwritable_log_file_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    // A regular file where the log directory should be
    let blocker = dir.path().join("logs");
    fs::write(&blocker, "not a directory").unwrap();

    let previous = swap_log_file(Some(blocker.join("collab.log")));
    log_info("first write fails");
    log_warn("second write fails quietly");
    let reported = write_failure_reported();
    swap_log_file(previous);

    assert!(reported);
}
