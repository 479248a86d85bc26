use chrono::{DateTime, SecondsFormat, Utc};
use fi_core::{FollowUpKind, FormFields};
use fi_notion::{BlockContent, TextRun};

use crate::questions::{answer_key, questions_for};

/// Blocks for one follow-up entry.
///
/// Layout: timestamp, blank line, then per answered question a paragraph with
/// the bold question and the answer followed by a blank line, then a divider.
/// Questions with a missing or empty answer produce nothing.
pub fn build_response_blocks(
    kind: FollowUpKind,
    responses: &FormFields,
    submitted_at: DateTime<Utc>,
) -> Vec<BlockContent> {
    let mut blocks = vec![
        BlockContent::paragraph(vec![
            TextRun::bold("Submitted"),
            TextRun::plain(format!(
                ": {}",
                submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            )),
        ]),
        BlockContent::blank_line(),
    ];

    for (index, question) in questions_for(kind).iter().enumerate() {
        let Some(answer) = responses.present(&answer_key(index)) else {
            continue;
        };
        blocks.push(BlockContent::paragraph(vec![
            TextRun::bold(format!("{question}\n")),
            TextRun::plain(answer),
        ]));
        blocks.push(BlockContent::blank_line());
    }

    blocks.push(BlockContent::Divider);
    blocks
}
