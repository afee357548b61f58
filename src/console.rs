//! Menu-driven console loop.
//!
//! The loop is generic over its input and output so tests can script a
//! session. Server-backed choices go through `RecordSource`, which already
//! degrades failures to empty results; the console only has to say so.

use crate::catalog::Catalog;
use crate::display::{render_details, render_table};
use crate::record::Record;
use crate::retriever::RecordSource;
use anyhow::Result;
use rand::Rng;
use std::io::{BufRead, Write};

const BANNER: &str = r"
╔══════════════════════════════════════════════╗
║      🐵  WELCOME TO THE MONKEY DATABASE  🐒   ║
║     Your gateway to fascinating monkey facts ║
╚══════════════════════════════════════════════╝";

const MENU: &str = "
  1. List all monkeys (local)
  2. Find monkey by name
  3. Get random monkey
  4. Show server monkeys as a table
  5. List monkeys from server
  6. List all monkeys (local + server)
  7. Find monkey on server
  8. Show a monkey's journey
  9. Exit
";

const RULE: &str = "═══════════════════════════════════════════════";
const SUGGESTION_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    ListLocal,
    FindLocal,
    Random,
    ServerTable,
    ServerList,
    ListMerged,
    FindOnServer,
    Journey,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::ListLocal),
            "2" => Some(MenuChoice::FindLocal),
            "3" => Some(MenuChoice::Random),
            "4" => Some(MenuChoice::ServerTable),
            "5" => Some(MenuChoice::ServerList),
            "6" => Some(MenuChoice::ListMerged),
            "7" => Some(MenuChoice::FindOnServer),
            "8" => Some(MenuChoice::Journey),
            "9" | "q" | "Q" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub struct Console<'a, R, W, G> {
    catalog: &'a Catalog,
    source: &'a dyn RecordSource,
    input: R,
    output: W,
    rng: G,
}

impl<'a, R: BufRead, W: Write, G: Rng> Console<'a, R, W, G> {
    pub fn new(catalog: &'a Catalog, source: &'a dyn RecordSource, input: R, output: W, rng: G) -> Self {
        Self {
            catalog,
            source,
            input,
            output,
            rng,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{BANNER}")?;
        loop {
            writeln!(self.output, "{MENU}")?;
            write!(self.output, "Enter your choice (1-9): ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };
            writeln!(self.output)?;

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Thanks for visiting! See you later! 🐒")?;
                    return Ok(());
                }
                Some(choice) => self.dispatch(choice)?,
                None => writeln!(
                    self.output,
                    "❌ Invalid option. Please enter a number between 1 and 9."
                )?,
            }

            write!(self.output, "\nPress Enter to continue...")?;
            self.output.flush()?;
            if self.read_line()?.is_none() {
                writeln!(self.output)?;
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::ListLocal => self.list_local(),
            MenuChoice::FindLocal => self.find_local(),
            MenuChoice::Random => self.random(),
            MenuChoice::ServerTable => self.server_table(),
            MenuChoice::ServerList => self.server_list(),
            MenuChoice::ListMerged => self.list_merged(),
            MenuChoice::FindOnServer => self.find_on_server(),
            MenuChoice::Journey => self.journey(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn list_local(&mut self) -> Result<()> {
        self.heading("ALL MONKEYS")?;
        let catalog = self.catalog;
        for record in catalog.list_all() {
            writeln!(self.output, "{}", render_details(record))?;
        }
        writeln!(self.output, "Total monkeys in database: {}", catalog.len())?;
        Ok(())
    }

    fn find_local(&mut self) -> Result<()> {
        let Some(name) = self.prompt_name("Enter the monkey name to search: ")? else {
            return Ok(());
        };
        let catalog = self.catalog;
        match catalog.find_by_name(&name) {
            Some(record) => {
                writeln!(self.output, "✅ Monkey found!\n")?;
                writeln!(self.output, "{}", render_details(record))?;
            }
            None => {
                writeln!(self.output, "❌ No monkey found with the name '{name}'.")?;
                writeln!(self.output, "\n💡 Tip: Try one of these names:")?;
                for record in catalog.list_all().iter().take(SUGGESTION_COUNT) {
                    writeln!(self.output, "   • {}", record.name)?;
                }
                if catalog.len() > SUGGESTION_COUNT {
                    writeln!(
                        self.output,
                        "   ... and {} more!",
                        catalog.len() - SUGGESTION_COUNT
                    )?;
                }
            }
        }
        Ok(())
    }

    fn random(&mut self) -> Result<()> {
        let catalog = self.catalog;
        match catalog.random_pick(&mut self.rng) {
            Ok(record) => {
                self.heading("YOUR RANDOM MONKEY IS...")?;
                writeln!(self.output, "{}", render_details(record))?;
            }
            Err(err) => writeln!(self.output, "❌ {err}")?,
        }
        Ok(())
    }

    fn server_table(&mut self) -> Result<()> {
        let records = self.fetch_from_server()?;
        if records.is_empty() {
            return Ok(());
        }
        self.heading("SERVER MONKEYS")?;
        write!(self.output, "{}", render_table(&records))?;
        writeln!(self.output, "\nTotal: {}", records.len())?;
        Ok(())
    }

    fn server_list(&mut self) -> Result<()> {
        let records = self.fetch_from_server()?;
        if records.is_empty() {
            return Ok(());
        }
        self.heading("SERVER MONKEYS")?;
        for record in &records {
            writeln!(self.output, "{}", render_details(record))?;
        }
        writeln!(self.output, "Total: {}", records.len())?;
        Ok(())
    }

    fn list_merged(&mut self) -> Result<()> {
        let records = self.fetch_from_server()?;
        let merged = self.catalog.merged_with(records);
        self.heading("ALL MONKEYS (LOCAL + SERVER)")?;
        write!(self.output, "{}", render_table(merged.list_all()))?;
        writeln!(
            self.output,
            "\nLocal: {}  Server-only: {}  Total: {}",
            self.catalog.len(),
            merged.len() - self.catalog.len(),
            merged.len()
        )?;
        Ok(())
    }

    fn find_on_server(&mut self) -> Result<()> {
        let Some(name) = self.prompt_name("Enter the monkey name to look up on the server: ")?
        else {
            return Ok(());
        };
        writeln!(self.output, "\n🔍 Searching for '{name}' on the server...\n")?;
        match self.source.find_record(&name) {
            Some(record) => writeln!(self.output, "{}", render_details(&record))?,
            None => writeln!(self.output, "❌ The server has no monkey named '{name}'.")?,
        }
        Ok(())
    }

    fn journey(&mut self) -> Result<()> {
        let Some(name) = self.prompt_name("Enter the monkey whose journey to show: ")? else {
            return Ok(());
        };
        writeln!(self.output, "\n🗺️  Getting journey for '{name}'...\n")?;
        match self.source.journey(&name) {
            Some(journey) => writeln!(self.output, "{journey}")?,
            None => writeln!(self.output, "❌ No journey available for '{name}'.")?,
        }
        Ok(())
    }

    fn fetch_from_server(&mut self) -> Result<Vec<Record>> {
        writeln!(self.output, "🌐 Contacting monkey server...")?;
        let records = self.source.list_records();
        if records.is_empty() {
            writeln!(
                self.output,
                "❌ No monkeys available from the server (see log output for details)."
            )?;
        }
        Ok(records)
    }

    fn prompt_name(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let name = self.read_line()?.unwrap_or_default();
        let name = name.trim();
        if name.is_empty() {
            writeln!(self.output, "❌ Please enter a valid monkey name.")?;
            return Ok(None);
        }
        Ok(Some(name.to_string()))
    }

    fn heading(&mut self, title: &str) -> Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "  {title}")?;
        writeln!(self.output, "{RULE}\n")?;
        Ok(())
    }

    /// Next input line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
