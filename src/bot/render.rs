//! Message formatting for posts and command replies.
//!
//! Kept free of Discord types so the exact wording can be tested.

use crate::{
    entities::{fortune, fortune::Provenance, submission},
    errors::Error,
};

/// Lines per message when listing; keeps each reply under Discord's size limit.
pub const LIST_CHUNK_SIZE: usize = 10;

const fn provenance_icon(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Guild => "🌟",
        Provenance::Global => "🌍",
        Provenance::Preloaded => "🔮",
    }
}

/// Heading such as `🌟 Guild Fortune #3`.
#[must_use]
pub fn fortune_heading(fortune: &fortune::Model) -> String {
    format!(
        "{} {} Fortune #{}",
        provenance_icon(fortune.provenance),
        fortune.provenance.label(),
        fortune.display_id
    )
}

/// Text of a delivery post, or the "nothing left" notice.
#[must_use]
pub fn delivery(fortune: Option<&fortune::Model>, prefix: &str) -> String {
    fortune.map_or_else(
        || format!("No fortunes available! Add some with `{prefix}add <fortune>`"),
        |f| format!("**{}:**\n{}", fortune_heading(f), f.text),
    )
}

/// Reply to a successful submission.
#[must_use]
pub fn submitted(submission: &submission::Model) -> String {
    let scope = if submission.origin_community.is_some() {
        "Guild"
    } else {
        "Global"
    };
    format!(
        "✨ {scope} fortune submitted for approval as submission #{}: \"{}\"",
        submission.id, submission.text
    )
}

/// Reply to an approval.
#[must_use]
pub fn approved(submission_id: i64, fortune: &fortune::Model) -> String {
    format!(
        "✅ Approved submission #{submission_id} as {} (id {})",
        fortune_heading(fortune),
        fortune.id
    )
}

/// Warning reply for expected, user-caused failures.
#[must_use]
pub fn warning(error: &Error) -> String {
    format!("⚠️ {error}")
}

/// One listing line: `12: Guild #3 - text`.
#[must_use]
pub fn list_line(fortune: &fortune::Model) -> String {
    let used = if fortune.used { " (used)" } else { "" };
    format!(
        "{}: {} #{} - {}{used}",
        fortune.id,
        fortune.provenance.label(),
        fortune.display_id,
        fortune.text
    )
}

/// Splits the fortune listing into numbered messages.
#[must_use]
pub fn fortune_list(fortunes: &[fortune::Model]) -> Vec<String> {
    if fortunes.is_empty() {
        return vec!["No fortunes in the database!".to_string()];
    }
    fortunes
        .chunks(LIST_CHUNK_SIZE)
        .enumerate()
        .map(|(i, chunk)| {
            let lines: Vec<String> = chunk.iter().map(list_line).collect();
            format!("**Fortunes (Part {}):**\n{}", i + 1, lines.join("\n"))
        })
        .collect()
}

/// One pending line: `4: Guild 99 - text` or `5: Global - text`.
#[must_use]
pub fn pending_line(submission: &submission::Model) -> String {
    let scope = submission
        .origin_community
        .as_ref()
        .map_or_else(|| "Global".to_string(), |c| format!("Guild {c}"));
    format!("{}: {scope} - {}", submission.id, submission.text)
}

/// Splits pending submissions into numbered messages.
#[must_use]
pub fn pending_list(pending: &[submission::Model]) -> Vec<String> {
    if pending.is_empty() {
        return vec!["No pending fortunes to approve!".to_string()];
    }
    pending
        .chunks(LIST_CHUNK_SIZE)
        .enumerate()
        .map(|(i, chunk)| {
            let lines: Vec<String> = chunk.iter().map(pending_line).collect();
            format!(
                "⏳ **Pending Approvals (Part {}):**\n{}",
                i + 1,
                lines.join("\n")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SubmissionStatus;
    use chrono::NaiveDateTime;

    fn fortune(id: i64, provenance: Provenance, display_id: i64, text: &str) -> fortune::Model {
        fortune::Model {
            id,
            display_id,
            text: text.to_string(),
            provenance,
            origin_community: None,
            used: false,
            submission_id: None,
            approved_by: None,
            created_at: NaiveDateTime::default(),
            approved_at: NaiveDateTime::default(),
        }
    }

    fn pending(id: i64, text: &str, community: Option<&str>) -> submission::Model {
        submission::Model {
            id,
            text: text.to_string(),
            origin_community: community.map(ToString::to_string),
            submitted_by: "author".to_string(),
            status: SubmissionStatus::Pending,
            fortune_id: None,
            resolved_by: None,
            created_at: NaiveDateTime::default(),
            resolved_at: None,
        }
    }

    #[test]
    fn test_delivery_text() {
        let f = fortune(1, Provenance::Guild, 3, "Beware of ducks.");
        assert_eq!(
            delivery(Some(&f), "mika "),
            "**🌟 Guild Fortune #3:**\nBeware of ducks."
        );
        assert_eq!(
            delivery(None, "mika "),
            "No fortunes available! Add some with `mika add <fortune>`"
        );
    }

    #[test]
    fn test_list_is_chunked() {
        let fortunes: Vec<fortune::Model> = (1..=23)
            .map(|i| fortune(i, Provenance::Preloaded, i, "text"))
            .collect();
        let messages = fortune_list(&fortunes);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("**Fortunes (Part 1):**"));
        assert!(messages[2].starts_with("**Fortunes (Part 3):**"));
        assert_eq!(messages[2].lines().count(), 4);
    }

    #[test]
    fn test_list_line_marks_used() {
        let mut f = fortune(12, Provenance::Global, 2, "Hello");
        assert_eq!(list_line(&f), "12: Global #2 - Hello");
        f.used = true;
        assert_eq!(list_line(&f), "12: Global #2 - Hello (used)");
    }

    #[test]
    fn test_empty_listings() {
        assert_eq!(fortune_list(&[]), vec!["No fortunes in the database!"]);
        assert_eq!(pending_list(&[]), vec!["No pending fortunes to approve!"]);
    }

    #[test]
    fn test_pending_list() {
        let messages = pending_list(&[pending(4, "One", Some("99")), pending(5, "Two", None)]);
        assert_eq!(
            messages,
            vec!["⏳ **Pending Approvals (Part 1):**\n4: Guild 99 - One\n5: Global - Two"]
        );
    }

    #[test]
    fn test_long_pending_queue_is_chunked() {
        let long_text = "x".repeat(150);
        let queue: Vec<submission::Model> = (1..=23)
            .map(|i| pending(i, &long_text, Some("99")))
            .collect();
        let messages = pending_list(&queue);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("⏳ **Pending Approvals (Part 1):**"));
        assert!(messages[2].starts_with("⏳ **Pending Approvals (Part 3):**"));
        assert_eq!(messages[2].lines().count(), 4);
        assert!(messages.iter().all(|m| m.chars().count() <= 2000));
    }

    #[test]
    fn test_warning_uses_error_text() {
        let err = Error::Duplicate {
            text: "Hi".to_string(),
        };
        assert_eq!(warning(&err), "⚠️ Fortune already exists: \"Hi\"");
    }
}
