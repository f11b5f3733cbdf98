//! End-to-end workflows against the `mq` binary
//!
//! Every test runs in its own temporary home with a fixture event file,
//! so nothing touches the network or the user's real config.

use crate::common::TestHome;
use crate::mq;
use anyhow::Result;
use std::time::Duration;

mod search {
    use super::*;

    #[test]
    fn test_search_lists_matching_events() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let result = mq!(&home, "search", "--fixture", &fixture, "--ephemeral", "mariners").assert_success()?;

        assert!(result.contains_stdout("  1.   Texas Rangers at Seattle Mariners"));
        assert!(result.contains_stdout("Sat, 4 Aug 2018 7:05 PM"));
        assert!(result.contains_stdout("Seattle, WA"));
        assert!(!result.contains_stdout("Decemberists"));
        Ok(())
    }

    #[test]
    fn test_search_is_case_insensitive_and_multi_word() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let result = mq!(&home, "search", "--fixture", &fixture, "--ephemeral", "RIVER", "cats").assert_success()?;

        assert!(result.contains_stdout("Tacoma Rainiers vs Sacramento River Cats"));
        assert!(result.contains_stdout("Sun, 5 Aug 2018 12:00 AM"));
        Ok(())
    }

    #[test]
    fn test_search_without_matches() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let result = mq!(&home, "search", "--fixture", &fixture, "--ephemeral", "opera").assert_success()?;

        assert!(result.contains_stdout("No events match"));
        assert_eq!(result.count_stdout(" | "), 0);
        Ok(())
    }

    #[test]
    fn test_search_with_missing_fixture_fails() -> Result<()> {
        let home = TestHome::new()?;
        let missing = home.path().join("missing.json").display().to_string();

        let result = mq!(&home, "search", "--fixture", &missing, "mariners").assert_failure()?;

        assert!(result.contains_stderr("Failed to load fixture"));
        Ok(())
    }

    #[test]
    fn test_show_prints_detail_with_home_team_image() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let result = mq!(&home, "show", "--fixture", &fixture, "--ephemeral", "mariners").assert_success()?;

        assert!(result.contains_stdout("Texas Rangers at Seattle Mariners"));
        assert!(result.contains_stdout("When:  Sat, 4 Aug 2018 7:05 PM"));
        assert!(result.contains_stdout("Image: https://img.example/mariners.jpg"));
        assert!(result.contains_stdout("ID:    4238961"));
        Ok(())
    }

    #[test]
    fn test_show_row_out_of_range_fails() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let result = mq!(&home, "show", "--fixture", &fixture, "--ephemeral", "--row", "4", "mariners")
            .assert_failure()?;

        assert!(result.contains_stderr("No row 4"));
        Ok(())
    }
}

mod favorites {
    use super::*;

    #[test]
    fn test_add_list_remove() -> Result<()> {
        let home = TestHome::new()?;

        let result = mq!(&home, "fav", "list").assert_success()?;
        assert!(result.contains_stdout("No favorites yet"));

        mq!(&home, "fav", "add", "4238961").assert_success()?;
        mq!(&home, "fav", "add", "4500012").assert_success()?;

        let result = mq!(&home, "fav", "list").assert_success()?;
        assert_eq!(result.stdout_lines(), vec!["4238961", "4500012"]);

        mq!(&home, "fav", "remove", "4238961").assert_success()?;
        let result = mq!(&home, "fav", "list").assert_success()?;
        assert_eq!(result.stdout_lines(), vec!["4500012"]);
        Ok(())
    }

    #[test]
    fn test_ephemeral_fav_commands_leave_store_untouched() -> Result<()> {
        let home = TestHome::new()?;

        mq!(&home, "fav", "add", "4238961").assert_success()?;

        let result = mq!(&home, "fav", "--ephemeral", "add", "999").assert_success()?;
        assert!(result.contains_stdout("Marked"));
        mq!(&home, "fav", "--ephemeral", "remove", "4238961").assert_success()?;

        // Ephemeral list starts empty
        let result = mq!(&home, "fav", "--ephemeral", "list").assert_success()?;
        assert!(result.contains_stdout("No favorites yet"));

        let result = mq!(&home, "fav", "list").assert_success()?;
        assert_eq!(result.stdout_lines(), vec!["4238961"]);
        Ok(())
    }

    #[test]
    fn test_toggle_flips_mark() -> Result<()> {
        let home = TestHome::new()?;

        let result = mq!(&home, "fav", "toggle", "77").assert_success()?;
        assert!(result.contains_stdout("Marked"));
        assert!(!result.contains_stdout("Unmarked"));

        let result = mq!(&home, "fav", "toggle", "77").assert_success()?;
        assert!(result.contains_stdout("Unmarked"));
        Ok(())
    }

    #[test]
    fn test_marked_event_shows_star_in_results() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        mq!(&home, "fav", "add", "4500012").assert_success()?;
        let result = mq!(&home, "search", "--fixture", &fixture, "decemberists").assert_success()?;
        assert!(result.contains_stdout("  1. ★ The Decemberists"));

        let result = mq!(&home, "show", "--fixture", &fixture, "decemberists").assert_success()?;
        assert!(result.contains_stdout("★ The Decemberists"));
        Ok(())
    }

    #[test]
    fn test_ephemeral_search_ignores_stored_marks() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        mq!(&home, "fav", "add", "4500012").assert_success()?;
        let result = mq!(&home, "search", "--fixture", &fixture, "--ephemeral", "decemberists").assert_success()?;
        assert!(result.contains_stdout("  1.   The Decemberists"));
        Ok(())
    }
}

mod config {
    use super::*;

    #[test]
    fn test_get_reads_config_file() -> Result<()> {
        let home = TestHome::new()?;

        let result = mq!(&home, "config", "--get", "search.short_delay_ms").assert_success()?;
        assert_eq!(result.stdout.trim(), "100");

        let result = mq!(&home, "config", "--get", "api.timeout_secs").assert_success()?;
        assert_eq!(result.stdout.trim(), "10");
        Ok(())
    }

    #[test]
    fn test_set_persists_value() -> Result<()> {
        let home = TestHome::new()?;

        mq!(&home, "config", "--set", "search.long_delay_ms", "2500").assert_success()?;

        let result = mq!(&home, "config", "--get", "search.long_delay_ms").assert_success()?;
        assert_eq!(result.stdout.trim(), "2500");

        // Other values survive the rewrite
        let result = mq!(&home, "config", "--get", "search.short_delay_ms").assert_success()?;
        assert_eq!(result.stdout.trim(), "100");
        Ok(())
    }

    #[test]
    fn test_set_rejects_out_of_range_value() -> Result<()> {
        let home = TestHome::new()?;

        mq!(&home, "config", "--set", "search.short_delay_ms", "0").assert_failure()?;

        let result = mq!(&home, "config", "--get", "search.short_delay_ms").assert_success()?;
        assert_eq!(result.stdout.trim(), "100");
        Ok(())
    }

    #[test]
    fn test_unknown_key_fails() -> Result<()> {
        let home = TestHome::new()?;

        let result = mq!(&home, "config", "--get", "search.speed").assert_failure()?;
        assert!(result.contains_stderr("mq config --list"));
        Ok(())
    }

    #[test]
    fn test_degenerate_delays_warn_after_logging_starts() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        // Test home uses long_delay_ms = 400
        let result = mq!(&home, "config", "--set", "search.short_delay_ms", "500").assert_success()?;
        assert!(result.contains_stdout("is not below search.long_delay_ms"));

        let result = mq!(&home, "search", "--fixture", &fixture, "--ephemeral", "mariners").assert_success()?;
        assert!(result.contains_stderr("search.short_delay_ms (500) is not below search.long_delay_ms (400)"));
        assert!(result.contains_stdout("Texas Rangers at Seattle Mariners"));
        Ok(())
    }

    #[test]
    fn test_path_reports_env_override() -> Result<()> {
        let home = TestHome::new()?;

        let result = mq!(&home, "config", "--path").assert_success()?;
        assert!(result.contains_stdout(&home.config_path().display().to_string()));
        Ok(())
    }
}

mod watch {
    use super::*;

    #[test]
    fn test_go_searches_current_text() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let mut cmd = mq!(&home, "watch", "--fixture", &fixture, "--ephemeral");
        cmd.stdin("mariners\n:go\n");
        let result = cmd.assert_success()?;

        assert!(result.contains_stdout("Type to search"));
        assert!(result.contains_stdout("Texas Rangers at Seattle Mariners"));
        assert!(!result.contains_stdout("Decemberists"));
        Ok(())
    }

    #[test]
    fn test_typing_pause_searches_automatically() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        // Test home uses short_delay_ms = 100
        let mut cmd = mq!(&home, "watch", "--fixture", &fixture, "--ephemeral");
        cmd.stdin("mariners\n").hold_stdin(Duration::from_millis(800));
        let result = cmd.assert_success()?;

        assert_eq!(result.count_stdout("  1.   Texas Rangers at Seattle Mariners"), 1);
        assert!(!result.contains_stdout("Decemberists"));
        Ok(())
    }

    #[test]
    fn test_pending_edit_is_dropped_at_end_of_input() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let mut cmd = mq!(&home, "watch", "--fixture", &fixture, "--ephemeral");
        cmd.stdin("mariners\n");
        let result = cmd.assert_success()?;

        assert!(!result.contains_stdout("Texas Rangers at Seattle Mariners"));
        Ok(())
    }

    #[test]
    fn test_quit_stops_reading_input() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let mut cmd = mq!(&home, "watch", "--fixture", &fixture, "--ephemeral");
        cmd.stdin(":quit\ndecemberists\n:go\n");
        let result = cmd.assert_success()?;

        assert!(!result.contains_stdout("The Decemberists"));
        Ok(())
    }

    #[test]
    fn test_bad_command_is_reported_and_session_continues() -> Result<()> {
        let home = TestHome::new()?;
        let fixture = home.fixture_path().display().to_string();

        let mut cmd = mq!(&home, "watch", "--fixture", &fixture, "--ephemeral");
        cmd.stdin(":dance\n:show 1\ndecemberists\n:go\n");
        let result = cmd.assert_success()?;

        assert!(result.contains_stdout("Unknown command ':dance'"));
        assert!(result.contains_stdout("No results yet"));
        assert!(result.contains_stdout("The Decemberists"));
        Ok(())
    }
}
