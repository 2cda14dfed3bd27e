use persondb::Field;
use thiserror::Error;

/// A single line of user input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Find { first: String, last: String },
    Family { last: String },
    First { first: String },
    Print,
    Oldest,
    Save,
    Relocate { first: String, last: String, zip: String },
    Update { first: String, last: String, field: Field, value: String },
    Delete { first: String, last: String },
    Verify,
    Tree,
    Help,
    Exit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("USAGE: {0}")]
    Usage(&'static str),
    #[error("UNKNOWN COMMAND: {0}\nType a valid command from the list above.")]
    Unknown(String),
    #[error("{0}")]
    Field(#[from] persondb::FieldParseError),
}

pub const HELP: &str = "\
Available Commands:
FIND [first] [last]           - Find specific person
FAMILY [last]                 - Find all with last name
FIRST [first]                 - Find all with first name
PRINT                         - Display all records
OLDEST                        - Find oldest person
SAVE                          - Save database to file
RELOCATE [f] [l] [zip]        - Update zip code
UPDATE [f] [l] [field] [val]  - Update state, zip, password, balance or ssn
DELETE [f] [l]                - Remove person
VERIFY                        - Check tree balance
TREE                          - Draw the tree
HELP                          - Show this list
EXIT                          - Save and exit";

impl Command {
    /// Parse a line of input. Returns `Ok(None)` for a blank line.
    ///
    /// The verb is case-insensitive, surplus arguments are ignored.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let args = tokens.map(str::to_owned).collect::<Vec<_>>();

        let arity = |n: usize, usage: &'static str| {
            if args.len() < n {
                Err(CommandError::Usage(usage))
            } else {
                Ok(())
            }
        };
        let arg = |i: usize| args[i].clone();

        let command = match verb.to_ascii_uppercase().as_str() {
            "FIND" => {
                arity(2, "FIND [first name] [last name]")?;
                Self::Find {
                    first: arg(0),
                    last: arg(1),
                }
            }
            "FAMILY" => {
                arity(1, "FAMILY [last name]")?;
                Self::Family { last: arg(0) }
            }
            "FIRST" => {
                arity(1, "FIRST [first name]")?;
                Self::First { first: arg(0) }
            }
            "PRINT" => Self::Print,
            "OLDEST" => Self::Oldest,
            "SAVE" => Self::Save,
            "RELOCATE" => {
                arity(3, "RELOCATE [first] [last] [new zip]")?;
                Self::Relocate {
                    first: arg(0),
                    last: arg(1),
                    zip: arg(2),
                }
            }
            "UPDATE" => {
                arity(4, "UPDATE [first] [last] [field] [value]")?;
                Self::Update {
                    first: arg(0),
                    last: arg(1),
                    field: args[2].parse()?,
                    value: arg(3),
                }
            }
            "DELETE" => {
                arity(2, "DELETE [first] [last]")?;
                Self::Delete {
                    first: arg(0),
                    last: arg(1),
                }
            }
            "VERIFY" => Self::Verify,
            "TREE" => Self::Tree,
            "HELP" => Self::Help,
            "EXIT" => Self::Exit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        };

        Ok(Some(command))
    }
}
