use std::env;
use std::fs;

const KERNEL_HOSTNAME: &str = "/proc/sys/kernel/hostname";
const ETC_HOSTNAME: &str = "/etc/hostname";

/// Local host name, used to build the default metric scheme.
///
/// Prefers the kernel hostname, then `HOSTNAME`, then `/etc/hostname`, and
/// falls back to `localhost`.
pub fn local_hostname() -> String {
    resolve_hostname(KERNEL_HOSTNAME, env::var("HOSTNAME").ok(), ETC_HOSTNAME)
}

fn resolve_hostname(kernel_file: &str, env_value: Option<String>, etc_file: &str) -> String {
    read_name(kernel_file)
        .or_else(|| env_value.and_then(non_empty))
        .or_else(|| read_name(etc_file))
        .unwrap_or_else(|| "localhost".to_string())
}

fn read_name(path: &str) -> Option<String> {
    fs::read_to_string(path).ok().and_then(non_empty)
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
