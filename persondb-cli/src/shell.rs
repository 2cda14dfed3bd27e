use std::io::{BufRead, Write};

use persondb::{Field, Person, PersonDB};

use crate::command::{Command, HELP};

/// What the read loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The interactive front end: reads commands, runs them against the database and prints the
/// results.
pub struct Shell<'a, W> {
    db: &'a PersonDB,
    out: W,
}

impl<'a, W: Write> Shell<'a, W> {
    #[inline]
    pub fn new(db: &'a PersonDB, out: W) -> Self {
        Self { db, out }
    }

    /// Prompt for and run commands until `EXIT` or the end of input.
    ///
    /// Reaching the end of input leaves without saving.
    pub fn run(&mut self, mut input: impl BufRead) -> anyhow::Result<()> {
        writeln!(self.out, "{HELP}")?;
        loop {
            write!(self.out, "\nEnter command > ")?;
            self.out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                tracing::info!("end of input, leaving without saving");
                writeln!(self.out)?;
                return Ok(());
            }

            match Command::parse(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => {
                    if self.execute(command)? == Flow::Exit {
                        return Ok(());
                    }
                }
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> anyhow::Result<Flow> {
        match command {
            Command::Find { first, last } => match self.db.get(&first, &last) {
                Some(person) => writeln!(self.out, "FOUND: {person}")?,
                None => self.not_found(&first, &last)?,
            },
            Command::Family { last } => {
                writeln!(self.out, "Searching for last name: {last}")?;
                let family = self.db.family(&last);
                self.print_all(&family)?;
            }
            Command::First { first } => {
                writeln!(self.out, "Searching for first name: {first}")?;
                let matches = self.db.with_first_name(&first);
                self.print_all(&matches)?;
            }
            Command::Print => {
                let records = self.db.records();
                if records.is_empty() {
                    writeln!(self.out, "DATABASE IS EMPTY")?;
                } else {
                    writeln!(self.out, "ALL RECORDS:\n------------")?;
                    self.print_all(&records)?;
                }
            }
            Command::Oldest => match self.db.oldest() {
                Some(p) => writeln!(
                    self.out,
                    "OLDEST PERSON: {} {} from {} (Zip: {}) Born: {}-{}-{}",
                    p.first_name,
                    p.last_name,
                    p.state,
                    p.zip_code,
                    p.birth_year,
                    p.birth_month,
                    p.birth_day
                )?,
                None => writeln!(self.out, "DATABASE IS EMPTY")?,
            },
            Command::Save => self.save()?,
            Command::Relocate { first, last, zip } => {
                match self.db.update(&first, &last, Field::ZipCode, &zip) {
                    Ok(true) => writeln!(
                        self.out,
                        "UPDATED: {first} {last} now lives in zip code {zip}"
                    )?,
                    Ok(false) => self.not_found(&first, &last)?,
                    Err(e) => writeln!(self.out, "ERROR: {e}")?,
                }
            }
            Command::Update {
                first,
                last,
                field,
                value,
            } => match self.db.update(&first, &last, field, &value) {
                Ok(true) => writeln!(self.out, "UPDATED: {first} {last} {field} is now {value}")?,
                Ok(false) => self.not_found(&first, &last)?,
                Err(e) => writeln!(self.out, "ERROR: {e}")?,
            },
            Command::Delete { first, last } => match self.db.delete(&first, &last) {
                Some(_) => writeln!(self.out, "DELETED: {first} {last}")?,
                None => self.not_found(&first, &last)?,
            },
            Command::Verify => {
                let report = self.db.verify();
                if report.balanced {
                    writeln!(self.out, "TREE STATUS: Balanced with height {}", report.height)?;
                } else {
                    writeln!(self.out, "TREE STATUS: Not balanced (height {})", report.height)?;
                }
            }
            Command::Tree => write!(self.out, "{:?}", self.db.debugger())?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Exit => {
                writeln!(self.out, "Saving database and exiting. Goodbye!")?;
                self.save()?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> anyhow::Result<()> {
        match self.db.save() {
            Ok(_) => {
                let path = self.db.path().map(|p| p.display().to_string());
                writeln!(
                    self.out,
                    "SUCCESS: Database saved to {}",
                    path.unwrap_or_default()
                )?;
            }
            Err(e) => {
                tracing::error!("save failed: {}", e);
                writeln!(self.out, "ERROR: {e}")?;
            }
        }
        Ok(())
    }

    #[inline]
    fn not_found(&mut self, first: &str, last: &str) -> std::io::Result<()> {
        writeln!(self.out, "PERSON NOT FOUND: {first} {last}")
    }

    fn print_all(&mut self, people: &[Person]) -> std::io::Result<()> {
        for person in people {
            writeln!(self.out, "{person}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use persondb::PersonDB;

    use super::Shell;

    const SAMPLE: &str = "\
Smith John TX 75001 1980 1 1 pw 100.5 111
Doe Jane CA 90210 1975 6 15 pw 20 222
Smith Adam TX 75002 1990 3 3 pw 0 333
";

    fn run(db: &PersonDB, input: &str) -> String {
        let mut out = Vec::new();
        Shell::new(db, &mut out).run(Cursor::new(input)).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> PersonDB {
        let db = PersonDB::in_memory();
        db.load(Cursor::new(SAMPLE)).unwrap();
        db
    }

    #[test]
    fn test_lookups() {
        let db = sample();
        let out = run(&db, "FIND John Smith\nfind Nobody Smith\nFAMILY Smith\nFIRST Jane\n");

        assert!(out.contains("FOUND: Smith John TX 75001 1980 1 1 pw 100.5 111\n"));
        assert!(out.contains("PERSON NOT FOUND: Nobody Smith\n"));
        assert!(out.contains(
            "Searching for last name: Smith\n\
             Smith Adam TX 75002 1990 3 3 pw 0 333\n\
             Smith John TX 75001 1980 1 1 pw 100.5 111\n"
        ));
        assert!(out.contains("Searching for first name: Jane\nDoe Jane CA 90210 1975 6 15 pw 20 222\n"));
    }

    #[test]
    fn test_mutations() {
        let db = sample();
        let out = run(
            &db,
            "RELOCATE John Smith 10001\nDELETE Jane Doe\nDELETE Jane Doe\nUPDATE Adam Smith state NY\nOLDEST\nVERIFY\n",
        );

        assert!(out.contains("UPDATED: John Smith now lives in zip code 10001\n"));
        assert!(out.contains("DELETED: Jane Doe\n"));
        assert!(out.contains("PERSON NOT FOUND: Jane Doe\n"));
        assert!(out.contains("UPDATED: Adam Smith state is now NY\n"));
        assert!(out.contains("OLDEST PERSON: John Smith from TX (Zip: 10001) Born: 1980-1-1\n"));
        assert!(out.contains("TREE STATUS: Balanced with height 2\n"));
        assert_eq!(db.get("Adam", "Smith").unwrap().state, "NY");
    }

    #[test]
    fn test_errors_and_empty() {
        let db = PersonDB::in_memory();
        let out = run(&db, "PRINT\nOLDEST\nFIND John\nbogus\nSAVE\n");

        assert_eq!(out.matches("DATABASE IS EMPTY\n").count(), 2);
        assert!(out.contains("USAGE: FIND [first name] [last name]\n"));
        assert!(out.contains("UNKNOWN COMMAND: bogus\n"));
        assert!(out.contains("ERROR: no backing file"));
        assert!(!out.contains("TREE STATUS"));
    }

    #[test]
    fn test_exit_saves() {
        let path = "target/shell_test_exit_saves.txt";
        _ = std::fs::remove_file(path);

        let db = persondb::Options::new()
            .create_if_missing(true)
            .open(path)
            .unwrap();
        db.load(Cursor::new(SAMPLE)).unwrap();

        let out = run(&db, "exit\nPRINT\n");
        assert!(out.contains("Saving database and exiting. Goodbye!\n"));
        assert!(out.contains(&format!("SUCCESS: Database saved to {path}\n")));
        // Nothing after EXIT runs.
        assert!(!out.contains("ALL RECORDS"));

        let saved = std::fs::read_to_string(path).unwrap();
        assert_eq!(saved.lines().next().unwrap(), "Doe Jane CA 90210 1975 6 15 pw 20 222");
        _ = std::fs::remove_file(path);
    }
}
