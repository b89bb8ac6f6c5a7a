// Interactive console session.
//
// Prompt loop:
// 1. Ask for a player name until one resolves (or `quit`)
// 2. Ask for a category, a comma-separated list, or `all`
// 3. Run the search and print one line per season with data
// 4. Offer another search

use crate::input::{category_menu, parse_categories, PlayerDirectory, ALL_CATEGORIES};
use crate::report::{write_results, OutputFormat};
use hotstreak_core::{Category, GameRecord, PlayerId, StreakFinder};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

const QUIT: &str = "quit";
const AGAIN_PROMPT: &str = "Would you like to conduct another search (enter \"Yes\" or \"No\")? ";

/// Console session over any line-based input and output.
pub struct Session<'a, R, W> {
    records: &'a [GameRecord],
    directory: PlayerDirectory,
    finder: StreakFinder,
    format: OutputFormat,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        records: &'a [GameRecord],
        finder: StreakFinder,
        format: OutputFormat,
        input: R,
        output: W,
    ) -> Self {
        Self {
            records,
            directory: PlayerDirectory::from_records(records),
            finder,
            format,
            input,
            output,
        }
    }

    /// Run searches until the user declines another one, types `quit`, or
    /// input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "This tool looks for players' hot stretches (relative to their season average) \
             in particular stat categories over the last few seasons."
        )?;

        loop {
            let Some((player_id, player_name)) = self.prompt_player()? else {
                writeln!(self.output, "Program has been terminated.")?;
                return Ok(());
            };
            let Some(categories) = self.prompt_categories()? else {
                writeln!(self.output, "Program has been terminated.")?;
                return Ok(());
            };
            writeln!(self.output, "Player & Category input parameters have been validated.")?;

            self.search(player_id, &player_name, &categories)?;

            let again = self.prompt(AGAIN_PROMPT)?;
            if !again.is_some_and(|a| is_yes(&a)) {
                break;
            }
        }

        writeln!(self.output, "Execution complete. Goodbye.")?;
        Ok(())
    }

    /// Run one search and write its results.
    pub fn search(
        &mut self,
        player_id: PlayerId,
        player_name: &str,
        categories: &[Category],
    ) -> io::Result<()> {
        info!(
            "searching streaks for {} ({}) in {} categories",
            player_name,
            player_id,
            categories.len()
        );
        let results = self.finder.find(self.records, player_id, categories);
        write_results(&mut self.output, player_id, player_name, categories, &results, self.format)
    }

    /// Read one trimmed line after printing `message`. `None` on end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_player(&mut self) -> io::Result<Option<(PlayerId, String)>> {
        loop {
            let Some(name) = self.prompt("\nEnter player name: ")? else {
                return Ok(None);
            };
            if name == QUIT {
                return Ok(None);
            }
            match self.directory.resolve(&name) {
                Ok(id) => return Ok(Some((id, name))),
                Err(e) => {
                    debug!("player lookup failed: {}", e);
                    writeln!(
                        self.output,
                        "INVALID INPUT: Unable to find player. \
                         Try again or enter \"{QUIT}\" to exit."
                    )?;
                }
            }
        }
    }

    fn prompt_categories(&mut self) -> io::Result<Option<Vec<Category>>> {
        let message = format!(
            "Select a category [{}] or enter \"{ALL_CATEGORIES}\": ",
            category_menu()
        );
        loop {
            let Some(answer) = self.prompt(&message)? else {
                return Ok(None);
            };
            if answer == QUIT {
                return Ok(None);
            }
            match parse_categories(&answer) {
                Ok(categories) => return Ok(Some(categories)),
                Err(e) => {
                    debug!("category selection rejected: {}", e);
                    writeln!(self.output, "INVALID INPUT: {e}. Please try again.")?;
                }
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
