/// Trim a raw log line and strip a leading `<digits>:<digits>` timestamp.
///
/// The timestamp only counts when at least one whitespace character follows it,
/// so a bare `"12:34"` is returned unchanged.
pub fn normalize_line(raw: &str) -> &str {
    let line = raw.trim();
    strip_timestamp(line).unwrap_or(line)
}

fn strip_timestamp(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();

    let minutes = digit_run(bytes, 0);
    if minutes == 0 || bytes.get(minutes) != Some(&b':') {
        return None;
    }
    let seconds = digit_run(bytes, minutes + 1);
    if seconds == 0 {
        return None;
    }

    let rest = &line[minutes + 1 + seconds..];
    let event = rest.trim_start();
    if event.len() == rest.len() {
        return None;
    }
    Some(event)
}

#[inline]
fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |tail| tail.iter().take_while(|b| b.is_ascii_digit()).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_indented_timestamp() {
        let raw = "  0:00 InitGame: \\sv_floodProtect\\1\\mapname\\q3dm17\n";
        assert_eq!(
            normalize_line(raw),
            "InitGame: \\sv_floodProtect\\1\\mapname\\q3dm17"
        );
    }

    #[test]
    fn test_strips_long_minutes() {
        assert_eq!(
            normalize_line("981:27 Kill: 1022 2 22: <world> killed Dono by MOD_FALLING\r\n"),
            "Kill: 1022 2 22: <world> killed Dono by MOD_FALLING"
        );
    }

    #[test]
    fn test_line_without_timestamp_is_only_trimmed() {
        assert_eq!(normalize_line("  Item: 2 weapon_rocketlauncher  "), "Item: 2 weapon_rocketlauncher");
    }

    #[test]
    fn test_bare_timestamp_is_kept() {
        assert_eq!(normalize_line("12:34"), "12:34");
        assert_eq!(normalize_line("  12:34\n"), "12:34");
    }

    #[test]
    fn test_partial_timestamps_are_kept() {
        assert_eq!(normalize_line("12: Kill"), "12: Kill");
        assert_eq!(normalize_line(":34 Kill"), ":34 Kill");
        assert_eq!(normalize_line("12:34Kill"), "12:34Kill");
    }

    #[test]
    fn test_only_first_timestamp_is_stripped() {
        assert_eq!(normalize_line("0:01 0:02 Exit:"), "0:02 Exit:");
    }

    #[test]
    fn test_empty_and_blank_lines() {
        assert_eq!(normalize_line(""), "");
        assert_eq!(normalize_line("   \n"), "");
    }
}
