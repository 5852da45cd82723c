//! # CharcuBot Options Command
//!
//! File: cli/src/commands/options.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `charcubot options`, which prints every configured option in
//! stored order (the order keyword matching scans them in), with its keywords
//! and number of responses. Options offered in the menu are starred.
//!
//! ```text
//! Options in 'data/responses.json':
//!
//!   # | Label           | Responses | Keywords
//! ----+-----------------+-----------+------------------------------
//!  1* | Jamón Ibérico   |         3 | jamón, ibérico, bellota
//!  2* | Quesos          |         2 | queso, manchego
//!
//! Found 2 option(s); * marks the 2 shown in the menu.
//! Use 'charcubot pick <Label>' to try one.
//! ```
//!
use crate::core::error::Result;
use crate::responses::{chatbot::Chatbot, BotOption};
use clap::Parser;
use std::fmt::{self, Write as _};
use std::path::Path;
use tracing::info;

/// # Options Arguments (`OptionsArgs`)
///
/// Takes no arguments; the struct keeps the command shape uniform.
#[derive(Parser, Debug)]
pub struct OptionsArgs {}

/// Handles `charcubot options`.
pub fn handle_options(_args: OptionsArgs, responses_override: Option<&Path>) -> Result<()> {
    info!("Listing configured options");
    let cfg = super::load_settings(responses_override)?;
    let bot = Chatbot::load(&cfg.bot);

    if bot.is_degraded() {
        println!("\nNo options available in '{}'.", cfg.bot.responses_file);
        println!("{}: {}", bot.name(), bot.unavailable_message());
        return Ok(());
    }

    println!("\nOptions in '{}':\n", cfg.bot.responses_file);
    print!("{}", render_table(&bot.responses().options, bot.menu().len())?);
    println!(
        "\nFound {} option(s); * marks the {} shown in the menu.",
        bot.responses().options.len(),
        bot.menu().len()
    );
    println!("Use 'charcubot pick <Label>' to try one.");
    Ok(())
}

fn render_table(
    options: &[BotOption],
    menu_len: usize,
) -> std::result::Result<String, fmt::Error> {
    let label_width = options
        .iter()
        .map(|option| option.label.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 30);

    let mut table = String::new();
    writeln!(
        table,
        "{:>4} | {:<width$} | Responses | Keywords",
        "#",
        "Label",
        width = label_width
    )?;
    writeln!(table, "{:-<5}+-{:-<width$}-+-----------+-{:-<30}", "", "", "", width = label_width)?;

    let mut menu_remaining = menu_len;
    for (index, option) in options.iter().enumerate() {
        let in_menu = option.has_label() && menu_remaining > 0;
        if in_menu {
            menu_remaining -= 1;
        }
        let number = format!("{}{}", index + 1, if in_menu { "*" } else { " " });
        writeln!(
            table,
            "{:>4} | {:<width$} | {:>9} | {}",
            number,
            option.label,
            option.responses.len(),
            option.keywords.join(", "),
            width = label_width
        )?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str, keywords: &[&str], responses: usize) -> BotOption {
        BotOption {
            label: label.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            responses: (0..responses).map(|i| format!("r{}", i)).collect(),
        }
    }

    #[test]
    fn test_render_table_rows_and_menu_marks() {
        let options = vec![
            option("Jamón Ibérico", &["jamón", "ibérico"], 3),
            option("", &["pan"], 1),
            option("Quesos", &["queso"], 2),
            option("Horario", &[], 1),
        ];
        let table = render_table(&options, 2).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "   # | Label         | Responses | Keywords");
        assert_eq!(lines[2], "  1* | Jamón Ibérico |         3 | jamón, ibérico");
        assert_eq!(lines[3], "  2  |               |         1 | pan");
        assert_eq!(lines[4], "  3* | Quesos        |         2 | queso");
        assert_eq!(lines[5], "  4  | Horario       |         1 | ");
    }

    #[test]
    fn test_whitespace_label_is_not_starred() {
        let options = vec![option("   ", &["oferta"], 1), option("Quesos", &["queso"], 2)];
        let table = render_table(&options, 1).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[2], "  1  |        |         1 | oferta");
        assert_eq!(lines[3], "  2* | Quesos |         2 | queso");
    }
}
