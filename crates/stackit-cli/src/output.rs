//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::markup::markup_to_text;
use crate::shell::ViewState;
use colored::*;
use stackit_domain::{Answer, FilterMode, Question, Snapshot, Tag, VoteKind, VoteOutcome};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// What the viewer may see and do on an expanded question.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailOptions<'a> {
    /// Signed-in identity of the viewer
    pub viewer: Option<&'a str>,
    /// Whether the question's answer input is open
    pub answer_input_open: bool,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a page of questions.
    pub fn format_snapshot(&self, snapshot: &Snapshot) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_snapshot_json(snapshot),
            OutputFormat::Table => Ok(self.format_snapshot_table(snapshot)),
            OutputFormat::Quiet => Ok(self.format_snapshot_quiet(snapshot)),
        }
    }

    /// Format a page as JSON.
    ///
    /// Descriptions are emitted as raw strings; JSON consumers treat them as data.
    fn format_snapshot_json(&self, snapshot: &Snapshot) -> Result<String> {
        let items: Vec<serde_json::Value> = snapshot.items.iter().map(question_json).collect();
        let value = serde_json::json!({
            "page": snapshot.page,
            "total_pages": snapshot.total_pages,
            "total_items": snapshot.total_items,
            "items": items,
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Format a page as a table with a pagination footer.
    fn format_snapshot_table(&self, snapshot: &Snapshot) -> String {
        if snapshot.is_empty() {
            return self.colorize("No questions found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Title", "Tags", "Author", "Answers"]);

        for (i, question) in snapshot.items.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                question.title.clone(),
                join_tags(&question.tags),
                question.author.clone(),
                question.answers.len().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", table, self.format_pagination(snapshot))
    }

    /// Format a page in quiet mode (IDs only).
    fn format_snapshot_quiet(&self, snapshot: &Snapshot) -> String {
        let ids: Vec<String> = snapshot.items.iter().map(|q| q.id.to_string()).collect();
        ids.join("\n")
    }

    /// Format the pager line, e.g. `< 1 [2] 3 >  page 2 of 3, 10 questions`.
    pub fn format_pagination(&self, snapshot: &Snapshot) -> String {
        let mut pager = vec![if snapshot.page > 1 { "<" } else { " " }.to_string()];
        for page in 1..=snapshot.total_pages {
            if page == snapshot.page {
                pager.push(self.colorize(&format!("[{}]", page), "green"));
            } else {
                pager.push(page.to_string());
            }
        }
        pager.push(if snapshot.page < snapshot.total_pages { ">" } else { " " }.to_string());

        format!(
            "{}  page {} of {}, {} question{}",
            pager.join(" "),
            snapshot.page,
            snapshot.total_pages,
            snapshot.total_items,
            plural(snapshot.total_items)
        )
    }

    /// Format an expanded question with its answers.
    pub fn format_question(&self, position: usize, question: &Question, options: DetailOptions<'_>) -> String {
        let mut lines = Vec::new();

        lines.push(self.colorize(&format!("#{} {}", position, question.title), "green"));
        lines.extend(markup_to_text(&question.description).lines().map(|l| format!("  {}", l)));

        let mut meta = format!(
            "  [{}]  By {}  {}",
            join_tags(&question.tags),
            question.author,
            answer_count(question.answers.len())
        );
        if options.viewer.is_some_and(|v| question.is_authored_by(v)) {
            meta.push_str(&format!("  {}", self.colorize(&format!("(delete {})", position), "magenta")));
        }
        lines.push(meta);

        match options.viewer {
            None => lines.push(self.colorize("  Please sign in to view and add answers.", "yellow")),
            Some(viewer) => {
                if question.answers.is_empty() {
                    lines.push(self.colorize("  No answers yet.", "cyan"));
                }
                for (i, answer) in question.answers.iter().enumerate() {
                    lines.push(self.format_answer(position, i + 1, answer, viewer));
                }
                if options.answer_input_open {
                    lines.push(self.info(&format!("  Type 'answer {} <text>' to reply", position)));
                }
            }
        }

        lines.join("\n")
    }

    fn format_answer(&self, position: usize, answer_position: usize, answer: &Answer, viewer: &str) -> String {
        let mut line = format!(
            "    {}. {}  - {}  {} {}",
            answer_position,
            answer.text,
            answer.author,
            self.colorize(&format!("+{}", answer.likes()), "green"),
            self.colorize(&format!("-{}", answer.dislikes()), "red"),
        );
        if let Some(kind) = answer.vote_of(viewer) {
            line.push_str(&format!("  (you: {})", kind.as_str()));
        }
        if answer.is_authored_by(viewer) {
            line.push_str(&format!(
                "  {}",
                self.colorize(&format!("(delete-answer {} {})", position, answer_position), "magenta")
            ));
        }
        line
    }

    /// Format the tag catalog, marking the active filter.
    pub fn format_tags(&self, active: Option<Tag>) -> String {
        Tag::ALL
            .iter()
            .enumerate()
            .map(|(i, tag)| {
                let entry = format!("{:>2}. {}", i + 1, tag);
                if Some(*tag) == active {
                    format!("{} {}", self.colorize(&entry, "green"), "(active)")
                } else {
                    entry
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the active filter selection.
    pub fn format_view_state(&self, view: ViewState) -> String {
        let tag = view.tag.map(|t| t.to_string()).unwrap_or_else(|| "any".to_string());
        let mode = match view.mode {
            FilterMode::All => "all",
            FilterMode::Newest => "newest first",
            FilterMode::Unanswered => "unanswered only",
        };
        self.info(&format!("Tag: {}, showing: {}", tag, mode))
    }

    /// Format the result of a vote.
    pub fn vote_result(&self, outcome: &VoteOutcome) -> String {
        match (outcome.previous, outcome.current) {
            (Some(prev), None) => self.info(&format!("Removed your {}", prev.as_str())),
            (Some(_), Some(kind)) => self.success(&format!("Changed your vote to {}", kind.as_str())),
            (None, Some(VoteKind::Like)) => self.success("Liked"),
            (None, Some(VoteKind::Dislike)) => self.success("Disliked"),
            (None, None) => String::new(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn question_json(q: &Question) -> serde_json::Value {
    let answers: Vec<serde_json::Value> = q
        .answers
        .iter()
        .map(|a| {
            serde_json::json!({
                "id": a.id.to_string(),
                "text": a.text,
                "author": a.author,
                "likes": a.likes(),
                "dislikes": a.dislikes(),
            })
        })
        .collect();

    serde_json::json!({
        "id": q.id.to_string(),
        "title": q.title,
        "description": q.description,
        "tags": q.tags.iter().map(Tag::as_str).collect::<Vec<_>>(),
        "author": q.author,
        "created_at": q.created_at,
        "answers": answers,
    })
}

fn join_tags(tags: &[Tag]) -> String {
    tags.iter().map(Tag::as_str).collect::<Vec<_>>().join(", ")
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Answer count label as shown on a question, e.g. `1 Answer`.
pub fn answer_count(count: usize) -> String {
    format!("{} Answer{}", count, plural(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackit_domain::{AnswerId, NewQuestion, QuestionId};

    fn create_test_question() -> Question {
        let mut q = Question::new(
            QuestionId::new(),
            NewQuestion::new(
                "What is a Trie?",
                "<p>Explain <b>trie</b> usage.</p><script>alert(1)</script>",
                vec![Tag::Hashing, Tag::Trie],
            ),
            "alice".to_string(),
            1_000,
        );
        let mut answer = Answer::new(AnswerId::new(), "A prefix tree".to_string(), "bob".to_string());
        answer.toggle_vote("alice", VoteKind::Like);
        q.answers.push(answer);
        q
    }

    fn snapshot(items: Vec<Question>) -> Snapshot {
        let total_items = items.len();
        Snapshot {
            items,
            total_pages: 3,
            total_items,
            page: 2,
            revision: 1,
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_snapshot(&snapshot(vec![create_test_question()])).unwrap();
        assert!(output.contains("Title"));
        assert!(output.contains("What is a Trie?"));
        assert!(output.contains("Hashing, Trie"));
        assert!(output.contains("< 1 [2] 3 >"));
    }

    #[test]
    fn test_json_format_keeps_raw_description() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_snapshot(&snapshot(vec![create_test_question()])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total_pages"], 3);
        assert_eq!(value["items"][0]["tags"][1], "Trie");
        assert_eq!(value["items"][0]["answers"][0]["likes"], 1);
        assert!(value["items"][0]["description"].as_str().unwrap().contains("<b>"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let question = create_test_question();
        let output = formatter.format_snapshot(&snapshot(vec![question.clone()])).unwrap();
        assert_eq!(output, question.id.to_string());
    }

    #[test]
    fn test_empty_page() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_snapshot(&snapshot(vec![])).unwrap();
        assert!(output.contains("No questions found"));
    }

    #[test]
    fn test_detail_renders_text_only() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_question(1, &create_test_question(), DetailOptions {
            viewer: Some("carol"),
            answer_input_open: false,
        });

        assert!(output.contains("Explain trie usage."));
        assert!(!output.contains("<b>"));
        assert!(!output.contains("alert"));
        assert!(output.contains("1 Answer"));
        assert!(output.contains("A prefix tree"));
        assert!(!output.contains("(delete"));
    }

    #[test]
    fn test_detail_offers_delete_to_authors_only() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let question = create_test_question();

        let as_alice = formatter.format_question(1, &question, DetailOptions {
            viewer: Some("alice"),
            answer_input_open: false,
        });
        assert!(as_alice.contains("(delete 1)"));
        assert!(as_alice.contains("(you: like)"));
        assert!(!as_alice.contains("(delete-answer"));

        let as_bob = formatter.format_question(1, &question, DetailOptions {
            viewer: Some("bob"),
            answer_input_open: false,
        });
        assert!(as_bob.contains("(delete-answer 1 1)"));
    }

    #[test]
    fn test_detail_signed_out() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_question(2, &create_test_question(), DetailOptions::default());
        assert!(output.contains("Please sign in to view and add answers."));
        assert!(!output.contains("A prefix tree"));
    }

    #[test]
    fn test_tag_listing_marks_active() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_tags(Some(Tag::Dp));
        assert!(output.contains(" 4. DP (active)"));
        assert!(output.contains(" 9. Trie"));
    }

    #[test]
    fn test_answer_count_label() {
        assert_eq!(answer_count(0), "0 Answers");
        assert_eq!(answer_count(1), "1 Answer");
        assert_eq!(answer_count(2), "2 Answers");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
