use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use chrono::Local;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::constants::APP_DIR;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

// Set after the first failed write so a broken log file is reported once
static WRITE_FAILED: AtomicBool = AtomicBool::new(false);

pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!("collab-{}.log", Local::now().format("%Y%m%d")));

    if let Ok(mut slot) = LOG_FILE.lock() {
        *slot = Some(log_file.clone());
    }

    log_debug(&format!("Logging initialized to: {}", log_file.display()));

    Ok(())
}

pub fn log_error(message: &str) {
    log_with_level("ERROR", message);
}

pub fn log_warn(message: &str) {
    log_with_level("WARN", message);
}

pub fn log_info(message: &str) {
    log_with_level("INFO", message);
}

pub fn log_debug(message: &str) {
    log_with_level("DEBUG", message);
}

pub fn log_panic_info(info: &std::panic::PanicInfo) {
    let mut message = String::from("PANIC: ");

    if let Some(location) = info.location() {
        message.push_str(&format!("at {}:{}:{} - ",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    if let Some(s) = info.payload().downcast_ref::<&str>() {
        message.push_str(s);
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        message.push_str(s);
    } else {
        message.push_str("Unknown panic payload");
    }

    log_error(&message);
}

fn log_with_level(level: &str, message: &str) {
    let Ok(guard) = LOG_FILE.lock() else {
        return;
    };
    let Some(log_file) = guard.as_ref() else {
        return;
    };

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let written = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .and_then(|mut file| writeln!(file, "[{}] {} - {}", timestamp, level, message));

    if let Err(e) = written {
        report_write_failure(log_file, &e);
    }
}

fn report_write_failure(log_file: &Path, error: &std::io::Error) {
    if !WRITE_FAILED.swap(true, Ordering::Relaxed) {
        eprintln!("Warning: could not write to log file {}: {}", log_file.display(), error);
    }
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|path| path.clone())
}

#[cfg(test)]
pub(crate) fn swap_log_file(path: Option<PathBuf>) -> Option<PathBuf> {
    match LOG_FILE.lock() {
        Ok(mut slot) => std::mem::replace(&mut *slot, path),
        Err(_) => None,
    }
}

#[cfg(test)]
pub(crate) fn write_failure_reported() -> bool {
    WRITE_FAILED.load(Ordering::Relaxed)
}
