//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use stackit_domain::traits::QuestionStore;
use stackit_domain::{Snapshot, ViewQuery};

/// Execute the list command.
pub fn execute_list<S: QuestionStore>(
    args: ListArgs,
    store: &S,
    page_size: usize,
    formatter: &Formatter,
) -> Result<()> {
    let snapshot = list_page(&args, store, page_size);
    println!("{}", formatter.format_snapshot(&snapshot)?);
    Ok(())
}

/// Build the view for the list arguments.
fn list_page<S: QuestionStore>(args: &ListArgs, store: &S, page_size: usize) -> Snapshot {
    store.view(&ViewQuery {
        tag: args.tag,
        mode: args.mode.into(),
        page: args.page,
        page_size,
    })
}
