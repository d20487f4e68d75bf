//! Tags command implementation.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use stackit_domain::Tag;

/// Execute the tags command.
pub fn execute_tags(formatter: &Formatter) -> Result<()> {
    match formatter.format() {
        OutputFormat::Json => {
            let names: Vec<&str> = Tag::ALL.iter().map(Tag::as_str).collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        OutputFormat::Quiet => {
            for tag in Tag::ALL {
                println!("{}", tag);
            }
        }
        OutputFormat::Table => println!("{}", formatter.format_tags(None)),
    }
    Ok(())
}
