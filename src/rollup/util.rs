use sha2::{Digest, Sha256};

/// Human-readable watch time, as the treemap tooltips print it.
pub fn format_watch_time(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds} s")
    } else if seconds < 3600 {
        let mins = seconds / 60;
        let secs = seconds % 60;
        if secs > 0 {
            format!("{mins} min {secs} s")
        } else {
            format!("{mins} min")
        }
    } else {
        let hrs = seconds / 3600;
        let mins = (seconds % 3600) / 60;
        if mins > 0 {
            format!("{hrs} h {mins} min")
        } else {
            format!("{hrs} h")
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_time_picks_coarsest_units() {
        assert_eq!(format_watch_time(45), "45 s");
        assert_eq!(format_watch_time(123), "2 min 3 s");
        assert_eq!(format_watch_time(120), "2 min");
        assert_eq!(format_watch_time(3723), "1 h 2 min");
        assert_eq!(format_watch_time(18_000), "5 h");
    }

    #[test]
    fn digest_is_lowercase_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
