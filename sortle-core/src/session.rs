use crate::config::GameConfig;
use crate::scorer::SubmissionResult;
use crate::selector::Puzzle;

pub const INCOMPLETE_MESSAGE: &str = "Set All Problems";

/// Attempt counter, clock and feedback texts for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    attempt_count: u32,
    started_at_ms: i64,
    result_text: Option<String>,
    share_text: Option<String>,
}

/// Outcome of one press of the submit button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Some slots were empty; no attempt consumed.
    Incomplete,
    Miss { hit_count: usize, attempt: u32 },
    Solved { attempts: u32, elapsed_secs: u64 },
}

impl Session {
    pub fn start(now_ms: i64) -> Self {
        Session {
            attempt_count: 1,
            started_at_ms: now_ms,
            result_text: None,
            share_text: None,
        }
    }

    pub fn restart(&mut self, now_ms: i64) {
        *self = Session::start(now_ms);
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    pub fn share_text(&self) -> Option<&str> {
        self.share_text.as_deref()
    }

    /// Whole seconds since the round started; a clock that went backwards reads 0.
    pub fn elapsed_secs(&self, now_ms: i64) -> u64 {
        (now_ms.saturating_sub(self.started_at_ms) / 1000).max(0) as u64
    }

    pub fn record_incomplete(&mut self) -> Submission {
        self.result_text = Some(INCOMPLETE_MESSAGE.to_string());
        self.share_text = None;
        Submission::Incomplete
    }

    pub fn record_result(
        &mut self,
        result: SubmissionResult,
        puzzle: &Puzzle,
        config: &GameConfig,
        now_ms: i64,
    ) -> Submission {
        if !result.is_complete {
            let attempt = self.attempt_count;
            self.result_text = Some(format!("{} Hit", result.hit_count));
            self.share_text = None;
            self.attempt_count += 1;
            return Submission::Miss {
                hit_count: result.hit_count,
                attempt,
            };
        }

        let attempts = self.attempt_count;
        let elapsed_secs = self.elapsed_secs(now_ms);
        let elapsed = format_elapsed(elapsed_secs);
        let brand = config.display_prefix();
        self.result_text = Some(format!(
            "🎉Correct!(From {}{}) Time:{} Attempts:{}",
            brand, puzzle.group_number, elapsed, attempts
        ));
        self.share_text = Some(format!(
            "{} Sortle ({})\nAttempts:{}\nTime:{}\n#{}Sortle",
            brand,
            puzzle.day.label(),
            attempts,
            elapsed,
            brand
        ));
        self.attempt_count = 1;
        Submission::Solved {
            attempts,
            elapsed_secs,
        }
    }
}

/// `mm:ss`; minutes keep counting past an hour.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// What gets handed to the platform share surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn new(config: &GameConfig, text: &str, url: &str) -> Self {
        SharePayload {
            title: format!("{} Sortle Result", config.display_prefix()),
            text: text.to_string(),
            url: url.to_string(),
        }
    }

    /// Text written to the clipboard when no share surface exists.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n{}", self.text, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::DaySeed;

    fn puzzle() -> Puzzle {
        Puzzle {
            group_id: "abc300".into(),
            group_number: 300,
            canonical_order: vec!["a".into(), "b".into()],
            slot_labels: vec!["A".into(), "B".into()],
            day: DaySeed::parse("2024-05-01").unwrap(),
        }
    }

    fn miss(hit_count: usize) -> SubmissionResult {
        SubmissionResult {
            hit_count,
            is_complete: false,
        }
    }

    const WIN: SubmissionResult = SubmissionResult {
        hit_count: 2,
        is_complete: true,
    };

    #[test]
    fn elapsed_formats_as_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(75), "01:15");
        assert_eq!(format_elapsed(3_725), "62:05");
    }

    #[test]
    fn incomplete_keeps_attempt_count() {
        let mut s = Session::start(0);
        assert_eq!(s.record_incomplete(), Submission::Incomplete);
        assert_eq!(s.attempt_count(), 1);
        assert_eq!(s.result_text(), Some(INCOMPLETE_MESSAGE));
        assert_eq!(s.share_text(), None);
    }

    #[test]
    fn misses_then_win_report_attempts() {
        let cfg = GameConfig::default();
        let p = puzzle();
        let mut s = Session::start(1_000);
        assert_eq!(
            s.record_result(miss(0), &p, &cfg, 2_000),
            Submission::Miss {
                hit_count: 0,
                attempt: 1
            }
        );
        assert_eq!(s.result_text(), Some("0 Hit"));
        assert_eq!(s.attempt_count(), 2);
        s.record_result(miss(1), &p, &cfg, 3_000);
        assert_eq!(s.attempt_count(), 3);

        let out = s.record_result(WIN, &p, &cfg, 1_000 + 83_900);
        assert_eq!(
            out,
            Submission::Solved {
                attempts: 3,
                elapsed_secs: 83
            }
        );
        assert_eq!(
            s.result_text(),
            Some("🎉Correct!(From ABC300) Time:01:23 Attempts:3")
        );
        assert_eq!(
            s.share_text(),
            Some("ABC Sortle (2024/05/01)\nAttempts:3\nTime:01:23\n#ABCSortle")
        );
        assert_eq!(s.attempt_count(), 1);
    }

    #[test]
    fn miss_clears_share_text() {
        let cfg = GameConfig::default();
        let p = puzzle();
        let mut s = Session::start(0);
        s.record_result(WIN, &p, &cfg, 0);
        assert!(s.share_text().is_some());
        s.record_result(miss(1), &p, &cfg, 0);
        assert_eq!(s.share_text(), None);
    }

    #[test]
    fn restart_clears_texts() {
        let cfg = GameConfig::default();
        let mut s = Session::start(0);
        s.record_result(miss(0), &puzzle(), &cfg, 10);
        s.restart(50);
        assert_eq!(s, Session::start(50));
    }

    #[test]
    fn clipboard_text_appends_url() {
        let payload = SharePayload::new(&GameConfig::default(), "hi", "https://x.test/");
        assert_eq!(payload.title, "ABC Sortle Result");
        assert_eq!(payload.clipboard_text(), "hi\nhttps://x.test/");
    }

    #[test]
    fn backwards_clock_reads_zero() {
        assert_eq!(Session::start(5_000).elapsed_secs(1_000), 0);
    }
}
