// Scripted console sessions against an in-memory record source.

use anyhow::Result;
use monkeydb::{BUILTIN_SIZE, Catalog, Console, Record, RecordSource};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::Cell;
use std::io::Cursor;

#[derive(Default)]
struct FakeSource {
    records: Vec<Record>,
    calls: Cell<usize>,
}

impl FakeSource {
    fn with(names: &[(&str, &str)]) -> Self {
        let records = names
            .iter()
            .map(|(name, location)| Record {
                name: name.to_string(),
                species: monkeydb::species_for_name(name).to_string(),
                location: location.to_string(),
                population: 1,
                description: format!("{name} from the server"),
                image_url: String::new(),
                coordinates: None,
            })
            .collect();
        Self {
            records,
            calls: Cell::new(0),
        }
    }
}

impl RecordSource for FakeSource {
    fn list_records(&self) -> Vec<Record> {
        self.calls.set(self.calls.get() + 1);
        self.records.clone()
    }

    fn find_record(&self, name: &str) -> Option<Record> {
        self.calls.set(self.calls.get() + 1);
        self.records.iter().find(|r| r.is_named(name)).cloned()
    }

    fn journey(&self, name: &str) -> Option<String> {
        self.calls.set(self.calls.get() + 1);
        self.find_record(name)
            .map(|record| format!("{} is on the road from {}", record.name, record.location))
    }
}

fn session(source: &FakeSource, input: &str) -> Result<String> {
    let catalog = Catalog::builtin();
    let mut output = Vec::new();
    Console::new(
        &catalog,
        source,
        Cursor::new(input.as_bytes()),
        &mut output,
        StdRng::seed_from_u64(42),
    )
    .run()?;
    Ok(String::from_utf8(output)?)
}

#[test]
fn lists_local_catalog_then_exits() -> Result<()> {
    let source = FakeSource::default();
    let out = session(&source, "1\n\n9\n")?;
    assert!(out.contains("ALL MONKEYS"));
    assert!(out.contains(&format!("Total monkeys in database: {BUILTIN_SIZE}")));
    assert!(out.contains("Thanks for visiting!"));
    assert_eq!(source.calls.get(), 0, "local listing must not hit the server");
    Ok(())
}

#[test]
fn find_by_name_is_case_insensitive() -> Result<()> {
    let out = session(&FakeSource::default(), "2\njapanese macaque\n\n9\n")?;
    assert!(out.contains("✅ Monkey found!"));
    assert!(out.contains("Macaca fuscata"));
    Ok(())
}

#[test]
fn unknown_name_shows_suggestions() -> Result<()> {
    let out = session(&FakeSource::default(), "2\nGorilla\n\n9\n")?;
    assert!(out.contains("No monkey found with the name 'Gorilla'"));
    assert!(out.contains("   • Baboon"));
    assert!(out.contains(&format!("... and {} more!", BUILTIN_SIZE - 5)));
    Ok(())
}

#[test]
fn blank_name_is_rejected_without_search() -> Result<()> {
    let out = session(&FakeSource::default(), "2\n   \n\n9\n")?;
    assert!(out.contains("Please enter a valid monkey name."));
    assert!(!out.contains("No monkey found"));
    Ok(())
}

#[test]
fn random_pick_prints_a_catalog_entry() -> Result<()> {
    let out = session(&FakeSource::default(), "3\n\n9\n")?;
    assert!(out.contains("YOUR RANDOM MONKEY IS..."));
    let catalog = Catalog::builtin();
    assert!(
        catalog
            .list_all()
            .iter()
            .any(|record| out.contains(&format!("🐒 {}\n", record.name)))
    );
    Ok(())
}

#[test]
fn empty_server_reports_unavailable() -> Result<()> {
    let source = FakeSource::default();
    let out = session(&source, "4\n\n5\n\n9\n")?;
    assert_eq!(out.matches("No monkeys available from the server").count(), 2);
    assert_eq!(source.calls.get(), 2);
    Ok(())
}

#[test]
fn merged_listing_appends_server_only_records() -> Result<()> {
    let source = FakeSource::with(&[("Mandrill", "Gabon"), ("Henry", "Phoenix")]);
    let out = session(&source, "6\n\n9\n")?;
    assert!(out.contains("ALL MONKEYS (LOCAL + SERVER)"));
    assert!(out.contains(&format!(
        "Local: {BUILTIN_SIZE}  Server-only: 1  Total: {}",
        BUILTIN_SIZE + 1
    )));
    assert!(out.contains("Henry"));
    assert!(!out.contains("Gabon"), "local Mandrill entry should win");
    Ok(())
}

#[test]
fn server_lookup_and_journey() -> Result<()> {
    let source = FakeSource::with(&[("Henry", "Phoenix")]);
    let out = session(&source, "7\nhenry\n\n8\nHenry\n\n8\nNobody\n\n9\n")?;
    assert!(out.contains("Henry from the server"));
    assert!(out.contains("Henry is on the road from Phoenix"));
    assert!(out.contains("No journey available for 'Nobody'"));
    Ok(())
}

#[test]
fn invalid_choice_and_eof_end_cleanly() -> Result<()> {
    let out = session(&FakeSource::default(), "x\n\n")?;
    assert!(out.contains("Invalid option"));
    assert!(!out.contains("Thanks for visiting!"));
    Ok(())
}
