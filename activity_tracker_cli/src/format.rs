use chrono::TimeDelta;

/// `HH:MM:SS`, hours keep counting past 24.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let seconds = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", seconds / 3600, seconds / 60 % 60, seconds % 60)
}

pub fn format_distance(km: f64) -> String {
    if km < 1. {
        format!("{:.0} m", km * 1000.)
    } else {
        format!("{:.2} km", km)
    }
}
