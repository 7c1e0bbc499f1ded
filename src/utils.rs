/// explodes if the var is missing; only call this during startup
pub fn env_var(k: &str) -> String {
    match std::env::var(k) {
        Ok(v) => v,
        Err(_e) => {
            panic!("Missing required environment variable {k}");
        }
    }
}

pub fn uuid_string() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// `MM:SS`, or `H:MM:SS` once there's an hour in there
pub fn format_secs(secs: u64) -> String {
    let mins = secs / 60;
    let hours = mins / 60;
    if hours > 0 {
        format!(
            "{hours}:{mins:02}:{secs:02}",
            hours = hours,
            mins = mins % 60,
            secs = secs % 60
        )
    } else {
        format!("{mins:02}:{secs:02}", mins = mins % 60, secs = secs % 60)
    }
}

/// treats whitespace-only strings the same as missing ones
pub fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
